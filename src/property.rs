/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The property-bag engine shared by items and folders.

mod bag;
mod definition;
mod schema;
mod value;

pub use bag::PropertyBag;
pub use definition::{PropertyDefinition, PropertyFlags, PropertyKind};
pub use schema::ServiceObjectSchema;
pub use value::{PropertyValue, PropertyValueType};

use crate::{
    types::PathToElement,
    xml::{EwsXmlWriter, XmlNamespace, NO_ATTRIBUTES},
    Error,
};

/// The element names used when writing field updates for one kind of
/// service object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateTarget {
    /// `SetItemField` or `SetFolderField`.
    pub set_field: &'static str,

    /// `DeleteItemField` or `DeleteFolderField`.
    pub delete_field: &'static str,

    /// The element wrapping the new value, e.g. `Message` or `Folder`.
    pub object_element: &'static str,
}

impl UpdateTarget {
    pub const fn item(object_element: &'static str) -> Self {
        Self {
            set_field: "SetItemField",
            delete_field: "DeleteItemField",
            object_element,
        }
    }

    pub const fn folder(object_element: &'static str) -> Self {
        Self {
            set_field: "SetFolderField",
            delete_field: "DeleteFolderField",
            object_element,
        }
    }

    /// Writes a set update for `path`, with `content` writing the property
    /// element inside the object element.
    pub(crate) fn write_set_field<F>(
        &self,
        writer: &mut EwsXmlWriter,
        path: &PathToElement,
        content: F,
    ) -> Result<(), Error>
    where
        F: FnOnce(&mut EwsXmlWriter) -> Result<(), Error>,
    {
        writer.write_element_with(XmlNamespace::Types, self.set_field, NO_ATTRIBUTES, |writer| {
            path.write(writer)?;
            writer.write_element_with(
                XmlNamespace::Types,
                self.object_element,
                NO_ATTRIBUTES,
                content,
            )
        })
    }

    pub(crate) fn write_delete_field(
        &self,
        writer: &mut EwsXmlWriter,
        path: &PathToElement,
    ) -> Result<(), Error> {
        writer.write_element_with(
            XmlNamespace::Types,
            self.delete_field,
            NO_ATTRIBUTES,
            |writer| path.write(writer),
        )
    }
}
