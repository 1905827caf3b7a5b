/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Low-level XML plumbing shared by every request and response type.

mod reader;
mod writer;

pub use reader::XmlElement;
pub use writer::{EwsXmlWriter, NO_ATTRIBUTES};

use crate::{Error, ERRORS_NS_URI, MESSAGES_NS_URI, SOAP_NS_URI, TYPES_NS_URI};

/// The XML namespaces used in EWS documents, each bound to the prefix this
/// crate writes it with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XmlNamespace {
    Soap,
    Messages,
    Types,
    Errors,
}

impl XmlNamespace {
    pub fn prefix(self) -> &'static str {
        match self {
            XmlNamespace::Soap => "soap",
            XmlNamespace::Messages => "m",
            XmlNamespace::Types => "t",
            XmlNamespace::Errors => "e",
        }
    }

    pub fn uri(self) -> &'static str {
        match self {
            XmlNamespace::Soap => SOAP_NS_URI,
            XmlNamespace::Messages => MESSAGES_NS_URI,
            XmlNamespace::Types => TYPES_NS_URI,
            XmlNamespace::Errors => ERRORS_NS_URI,
        }
    }

    /// The `xmlns:prefix` attribute declaring this namespace.
    pub fn declaration(self) -> (String, &'static str) {
        (format!("xmlns:{}", self.prefix()), self.uri())
    }
}

/// Parses an `xs:boolean` value.
pub(crate) fn parse_bool(value: &str) -> Result<bool, Error> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(Error::InvalidValue {
            kind: "boolean",
            value: other.to_owned(),
        }),
    }
}

pub(crate) fn bool_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
