/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    complex::ExtendedPropertyCollection,
    property::{PropertyBag, UpdateTarget},
    types::FolderId,
    xml::XmlElement,
    Error,
};

use super::{schema::folder_schema, ServiceObject, FOLDER_SCHEMA};

text_enum! {
    /// The kinds of folder EWS distinguishes, named after their XML elements.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/folders-ex15websvcsotherref>
    pub enum FolderKind {
        Folder,
        CalendarFolder,
        ContactsFolder,
        SearchFolder,
        TasksFolder,
    }
}

/// A folder in a mailbox.
#[derive(Clone, Debug)]
pub struct Folder {
    kind: FolderKind,
    bag: PropertyBag,
}

impl Folder {
    /// Creates a new, unsaved folder.
    pub fn new(kind: FolderKind) -> Self {
        Self {
            kind,
            bag: PropertyBag::new(&FOLDER_SCHEMA),
        }
    }

    pub fn kind(&self) -> FolderKind {
        self.kind
    }

    pub(crate) fn from_element(element: &XmlElement) -> Result<Self, Error> {
        let kind = element.name().parse().unwrap_or_else(|_| {
            log::debug!("reading unknown folder type `{}` as Folder", element.name());
            FolderKind::Folder
        });

        let mut folder = Folder::new(kind);
        folder.bag.load_from_xml(element, true)?;

        Ok(folder)
    }

    complex_property!(id, folder_schema::FOLDER_ID, FolderId);
    complex_property!(parent_folder_id, folder_schema::PARENT_FOLDER_ID, FolderId);
    string_property!(
        /// The message class of items the folder holds, e.g. `IPF.Note`.
        folder_class, set_folder_class, folder_schema::FOLDER_CLASS
    );
    string_property!(display_name, set_display_name, folder_schema::DISPLAY_NAME);
    copy_property!(total_count, folder_schema::TOTAL_COUNT, i64);
    copy_property!(child_folder_count, folder_schema::CHILD_FOLDER_COUNT, i64);
    collection_property!(
        extended_properties,
        extended_properties_mut,
        folder_schema::EXTENDED_PROPERTIES,
        ExtendedPropertyCollection
    );
    copy_property!(unread_count, folder_schema::UNREAD_COUNT, i64);
}

impl ServiceObject for Folder {
    fn property_bag(&self) -> &PropertyBag {
        &self.bag
    }

    fn property_bag_mut(&mut self) -> &mut PropertyBag {
        &mut self.bag
    }

    fn xml_element_name(&self) -> &'static str {
        self.kind.as_str()
    }

    fn update_target(&self) -> UpdateTarget {
        UpdateTarget::folder(self.kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        complex::ExtendedPropertyDefinition,
        test_utils::{parse_element, write_to_string},
        types::{server_version::ExchangeServerVersion, MapiPropertyType},
    };

    #[test]
    fn loads_counts_and_updates_display_name() {
        let mut folder = Folder::from_element(&parse_element(concat!(
            "<t:ContactsFolder>",
            r#"<t:FolderId Id="AQMk" ChangeKey="AQAA"/>"#,
            r#"<t:ParentFolderId Id="AQMr"/>"#,
            "<t:FolderClass>IPF.Contact</t:FolderClass>",
            "<t:DisplayName>Contacts</t:DisplayName>",
            "<t:TotalCount>12</t:TotalCount>",
            "<t:ChildFolderCount>0</t:ChildFolderCount>",
            "<t:UnreadCount>0</t:UnreadCount>",
            "</t:ContactsFolder>"
        )))
        .unwrap();

        assert_eq!(folder.kind(), FolderKind::ContactsFolder);
        assert_eq!(folder.total_count().unwrap(), Some(12));
        assert_eq!(folder.parent_folder_id().unwrap().map(|id| id.id.as_str()), Some("AQMr"));

        folder.set_display_name("People").unwrap();

        let written = write_to_string(|writer| {
            folder.write_updates_to_xml(writer, ExchangeServerVersion::Exchange2013_SP1)
        });
        assert_eq!(
            written,
            concat!(
                r#"<t:SetFolderField><t:FieldURI FieldURI="folder:DisplayName"/>"#,
                "<t:ContactsFolder><t:DisplayName>People</t:DisplayName></t:ContactsFolder>",
                "</t:SetFolderField>"
            )
        );
    }

    #[test]
    fn new_folder_writes_settable_properties() {
        let mut folder = Folder::new(FolderKind::Folder);
        folder.set_display_name("Receipts").unwrap();
        folder.extended_properties_mut().unwrap().set(
            ExtendedPropertyDefinition::tagged(0x3613, MapiPropertyType::String),
            "IPF.Note",
        );

        let written = write_to_string(|writer| {
            folder.write_to_xml(writer, ExchangeServerVersion::Exchange2013_SP1)
        });
        assert_eq!(
            written,
            concat!(
                "<t:Folder>",
                "<t:DisplayName>Receipts</t:DisplayName>",
                "<t:ExtendedProperty>",
                r#"<t:ExtendedFieldURI PropertyTag="0x3613" PropertyType="String"/>"#,
                "<t:Value>IPF.Note</t:Value>",
                "</t:ExtendedProperty>",
                "</t:Folder>"
            )
        );
    }
}
