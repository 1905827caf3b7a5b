/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

/// Declares a fieldless enum whose variants are written to and read from XML
/// as text.
///
/// Variants use their own name as their text unless one is given with
/// `Variant = "text"`. The generated enum implements `as_str()`, `VALUES`,
/// `Display` and `FromStr`, failing with [`Error::InvalidValue`](crate::Error) on
/// unrecognized text.
macro_rules! text_enum {
    (@text $variant:ident) => {
        stringify!($variant)
    };

    (@text $variant:ident, $text:literal) => {
        $text
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $text:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// The text of every variant, in declaration order.
            pub const VALUES: &'static [&'static str] = &[
                $( text_enum!(@text $variant $(, $text)?), )*
            ];

            /// The text representation of this value in EWS documents.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => text_enum!(@text $variant $(, $text)?), )*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                $(
                    if value == text_enum!(@text $variant $(, $text)?) {
                        return Ok($name::$variant);
                    }
                )*

                Err($crate::Error::InvalidValue {
                    kind: stringify!($name),
                    value: value.to_owned(),
                })
            }
        }
    };
}
