/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Items and folders, the service objects requests operate on.

use crate::{
    property::{PropertyBag, UpdateTarget},
    types::server_version::ExchangeServerVersion,
    xml::{EwsXmlWriter, XmlNamespace, NO_ATTRIBUTES},
    Error,
};

/// Typed getter and setter pairs for string properties.
macro_rules! string_property {
    ($(#[$meta:meta])* $getter:ident, $setter:ident, $definition:path) => {
        string_property!($(#[$meta])* $getter, $definition);

        pub fn $setter(&mut self, value: impl Into<String>) -> Result<(), $crate::Error> {
            self.property_bag_mut().set(&$definition, value.into())
        }
    };

    ($(#[$meta:meta])* $getter:ident, $definition:path) => {
        $(#[$meta])*
        pub fn $getter(&self) -> Result<Option<&str>, $crate::Error> {
            Ok(self
                .property_bag()
                .get::<String>(&$definition)?
                .map(String::as_str))
        }
    };
}

/// Typed getter and setter pairs for properties with `Copy` values.
macro_rules! copy_property {
    ($(#[$meta:meta])* $getter:ident, $setter:ident, $definition:path, $ty:ty) => {
        copy_property!($(#[$meta])* $getter, $definition, $ty);

        pub fn $setter(&mut self, value: $ty) -> Result<(), $crate::Error> {
            self.property_bag_mut().set(&$definition, value)
        }
    };

    ($(#[$meta:meta])* $getter:ident, $definition:path, $ty:ty) => {
        $(#[$meta])*
        pub fn $getter(&self) -> Result<Option<$ty>, $crate::Error> {
            Ok(self.property_bag().get::<$ty>(&$definition)?.copied())
        }
    };
}

/// Typed getter and setter pairs for properties restricted to the values of
/// a text enum.
macro_rules! enum_property {
    ($(#[$meta:meta])* $getter:ident, $setter:ident, $definition:path, $ty:ty) => {
        $(#[$meta])*
        pub fn $getter(&self) -> Result<Option<$ty>, $crate::Error> {
            self.property_bag()
                .get::<String>(&$definition)?
                .map(|text| text.parse::<$ty>())
                .transpose()
        }

        pub fn $setter(&mut self, value: $ty) -> Result<(), $crate::Error> {
            self.property_bag_mut().set(&$definition, value.as_str())
        }
    };
}

/// Typed getter and setter pairs for properties with structured values.
macro_rules! complex_property {
    ($(#[$meta:meta])* $getter:ident, $setter:ident, $definition:path, $ty:ty) => {
        complex_property!($(#[$meta])* $getter, $definition, $ty);

        pub fn $setter(&mut self, value: $ty) -> Result<(), $crate::Error> {
            self.property_bag_mut().set(&$definition, value)
        }
    };

    ($(#[$meta:meta])* $getter:ident, $definition:path, $ty:ty) => {
        $(#[$meta])*
        pub fn $getter(&self) -> Result<Option<&$ty>, $crate::Error> {
            self.property_bag().get::<$ty>(&$definition)
        }
    };
}

/// Getters for collection properties, along with a mutable accessor which
/// creates an empty collection on first use. On a saved object whose list
/// was never loaded, the mutable accessor fails with
/// [`Error::PropertyNotLoaded`](crate::Error::PropertyNotLoaded).
macro_rules! collection_property {
    ($(#[$meta:meta])* $getter:ident, $getter_mut:ident, $definition:path, $ty:ty) => {
        $(#[$meta])*
        pub fn $getter(&self) -> Result<Option<&$ty>, $crate::Error> {
            self.property_bag().get::<$ty>(&$definition)
        }

        pub fn $getter_mut(&mut self) -> Result<&mut $ty, $crate::Error> {
            self.property_bag_mut().get_or_insert_default::<$ty>(&$definition)
        }
    };
}

mod contact;
mod email_message;
mod folder;
mod item;
pub mod schema;

pub use contact::Contact;
pub use email_message::EmailMessage;
pub use folder::{Folder, FolderKind};
pub use item::{Item, ItemKind};
pub use schema::{
    contact_schema, email_message_schema, folder_schema, item_schema, CONTACT_SCHEMA,
    EMAIL_MESSAGE_SCHEMA, FOLDER_SCHEMA, ITEM_SCHEMA,
};

/// An object stored on the server and described by a property schema.
pub trait ServiceObject {
    fn property_bag(&self) -> &PropertyBag;

    fn property_bag_mut(&mut self) -> &mut PropertyBag;

    /// The local name of the element representing this object, e.g.
    /// `Message` or `Folder`.
    fn xml_element_name(&self) -> &'static str;

    /// The element names used when writing updates for this object.
    fn update_target(&self) -> UpdateTarget;

    /// Whether the object has not been saved to the server yet.
    fn is_new(&self) -> bool {
        self.property_bag().is_new()
    }

    /// Whether the object has changes an update would send.
    fn is_dirty(&self) -> bool {
        self.property_bag().is_update_call_necessary()
    }

    /// Writes the whole object, as used when creating it.
    fn write_to_xml(
        &self,
        writer: &mut EwsXmlWriter,
        version: ExchangeServerVersion,
    ) -> Result<(), Error> {
        writer.write_element_with(
            XmlNamespace::Types,
            self.xml_element_name(),
            NO_ATTRIBUTES,
            |writer| self.property_bag().write_to_xml(writer, version),
        )
    }

    /// Writes the contents of the `Updates` element of an item or folder
    /// change.
    fn write_updates_to_xml(
        &self,
        writer: &mut EwsXmlWriter,
        version: ExchangeServerVersion,
    ) -> Result<(), Error> {
        self.property_bag()
            .write_to_xml_for_update(writer, version, &self.update_target())
    }

    /// Takes on the values the server returned for this object after a
    /// create or update, such as its new id and change key, and forgets the
    /// changes which were sent.
    fn apply_server_response(&mut self, returned: &Self)
    where
        Self: Sized,
    {
        self.property_bag_mut().merge_from(returned.property_bag());
    }
}
