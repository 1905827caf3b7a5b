/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    complex::{
        ExtendedPropertyCollection, Flag, InternetMessageHeaders, MessageBody, MimeContent,
        StringList,
    },
    property::{PropertyBag, ServiceObjectSchema, UpdateTarget},
    types::{DateTime, FolderId, Importance, ItemId, Sensitivity},
    xml::XmlElement,
    Error,
};

use super::{schema::item_schema, ServiceObject, CONTACT_SCHEMA, EMAIL_MESSAGE_SCHEMA, ITEM_SCHEMA};

text_enum! {
    /// The kinds of item EWS distinguishes, named after their XML elements.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/items>
    pub enum ItemKind {
        Item,
        Message,
        CalendarItem,
        Contact,
        DistributionList,
        MeetingMessage,
        MeetingRequest,
        MeetingResponse,
        MeetingCancellation,
        Task,
        PostItem,
    }
}

impl ItemKind {
    /// The schema describing items of this kind.
    pub fn schema(&self) -> &'static ServiceObjectSchema {
        match self {
            ItemKind::Message
            | ItemKind::MeetingMessage
            | ItemKind::MeetingRequest
            | ItemKind::MeetingResponse
            | ItemKind::MeetingCancellation => &EMAIL_MESSAGE_SCHEMA,
            ItemKind::Contact => &CONTACT_SCHEMA,
            _ => &ITEM_SCHEMA,
        }
    }
}

/// An item in a mailbox, such as a message or a contact.
#[derive(Clone, Debug)]
pub struct Item {
    kind: ItemKind,
    bag: PropertyBag,
}

impl Item {
    /// Creates a new, unsaved item.
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            bag: PropertyBag::new(kind.schema()),
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn schema(&self) -> &'static ServiceObjectSchema {
        self.bag.schema()
    }

    /// Reads an item from an element of a response, e.g. `<t:Message>`.
    ///
    /// Elements of item types this crate has no kind for are read as plain
    /// items.
    pub(crate) fn from_element(element: &XmlElement) -> Result<Self, Error> {
        let kind = element.name().parse().unwrap_or_else(|_| {
            log::debug!("reading unknown item type `{}` as Item", element.name());
            ItemKind::Item
        });

        let mut item = Item::new(kind);
        item.bag.load_from_xml(element, true)?;

        Ok(item)
    }

    complex_property!(
        /// The MIME content of the item, only returned when requested
        /// explicitly.
        mime_content, set_mime_content, item_schema::MIME_CONTENT, MimeContent
    );
    complex_property!(id, item_schema::ITEM_ID, ItemId);
    complex_property!(parent_folder_id, item_schema::PARENT_FOLDER_ID, FolderId);
    string_property!(item_class, set_item_class, item_schema::ITEM_CLASS);
    string_property!(subject, set_subject, item_schema::SUBJECT);
    enum_property!(sensitivity, set_sensitivity, item_schema::SENSITIVITY, Sensitivity);
    complex_property!(body, set_body, item_schema::BODY, MessageBody);
    copy_property!(date_time_received, item_schema::DATE_TIME_RECEIVED, DateTime);
    copy_property!(
        /// The size of the item in bytes.
        size, item_schema::SIZE, i64
    );
    collection_property!(categories, categories_mut, item_schema::CATEGORIES, StringList);
    enum_property!(importance, set_importance, item_schema::IMPORTANCE, Importance);
    string_property!(in_reply_to, set_in_reply_to, item_schema::IN_REPLY_TO);
    copy_property!(is_submitted, item_schema::IS_SUBMITTED, bool);
    copy_property!(is_draft, item_schema::IS_DRAFT, bool);
    copy_property!(is_from_me, item_schema::IS_FROM_ME, bool);
    copy_property!(is_resend, item_schema::IS_RESEND, bool);
    copy_property!(is_unmodified, item_schema::IS_UNMODIFIED, bool);
    complex_property!(
        internet_message_headers,
        item_schema::INTERNET_MESSAGE_HEADERS,
        InternetMessageHeaders
    );
    copy_property!(date_time_sent, item_schema::DATE_TIME_SENT, DateTime);
    copy_property!(date_time_created, item_schema::DATE_TIME_CREATED, DateTime);
    copy_property!(reminder_due_by, set_reminder_due_by, item_schema::REMINDER_DUE_BY, DateTime);
    copy_property!(is_reminder_set, set_is_reminder_set, item_schema::IS_REMINDER_SET, bool);
    copy_property!(
        reminder_minutes_before_start,
        set_reminder_minutes_before_start,
        item_schema::REMINDER_MINUTES_BEFORE_START,
        i64
    );
    string_property!(display_cc, item_schema::DISPLAY_CC);
    string_property!(display_to, item_schema::DISPLAY_TO);
    copy_property!(has_attachments, item_schema::HAS_ATTACHMENTS, bool);
    collection_property!(
        extended_properties,
        extended_properties_mut,
        item_schema::EXTENDED_PROPERTIES,
        ExtendedPropertyCollection
    );
    string_property!(culture, set_culture, item_schema::CULTURE);
    string_property!(last_modified_name, item_schema::LAST_MODIFIED_NAME);
    copy_property!(last_modified_time, item_schema::LAST_MODIFIED_TIME, DateTime);
    copy_property!(
        /// Whether the item is hidden from the folder's normal contents.
        is_associated, set_is_associated, item_schema::IS_ASSOCIATED, bool
    );
    complex_property!(conversation_id, item_schema::CONVERSATION_ID, ItemId);
    complex_property!(flag, set_flag, item_schema::FLAG, Flag);
    string_property!(preview, item_schema::PREVIEW);
}

impl ServiceObject for Item {
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
        UpdateTarget::item(self.kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        complex::{ExtendedPropertyDefinition, ExtendedPropertyValue},
        test_utils::{parse_element, write_to_string},
        types::{server_version::ExchangeServerVersion, BodyType, MapiPropertyType},
    };

    #[test]
    fn new_item_writes_its_element_in_schema_order() {
        let mut item = Item::new(ItemKind::Message);
        item.set_importance(Importance::High).unwrap();
        item.set_subject("Quarterly report").unwrap();
        item.set_body(MessageBody::new(BodyType::Text, "Attached.")).unwrap();
        item.categories_mut().unwrap().push("Work");

        assert!(item.is_new());
        assert_eq!(item.schema().name(), "EmailMessage");

        let written = write_to_string(|writer| {
            item.write_to_xml(writer, ExchangeServerVersion::Exchange2013_SP1)
        });
        assert_eq!(
            written,
            concat!(
                "<t:Message>",
                "<t:Subject>Quarterly report</t:Subject>",
                r#"<t:Body BodyType="Text">Attached.</t:Body>"#,
                "<t:Categories><t:String>Work</t:String></t:Categories>",
                "<t:Importance>High</t:Importance>",
                "</t:Message>"
            )
        );
    }

    #[test]
    fn read_only_properties_have_no_setter_and_are_refused() {
        let mut item = Item::new(ItemKind::Item);
        assert!(matches!(
            item.property_bag_mut().set(&item_schema::SIZE, 10),
            Err(Error::ReadOnlyProperty("Size"))
        ));
    }

    #[test]
    fn loads_items_from_response_elements() {
        let item = Item::from_element(&parse_element(concat!(
            r#"<t:Message xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">"#,
            r#"<t:ItemId Id="AAMk" ChangeKey="CQAA"/>"#,
            "<t:Subject>Hello</t:Subject>",
            "<t:Sensitivity>Private</t:Sensitivity>",
            "<t:Size>1024</t:Size>",
            "<t:IsDraft>false</t:IsDraft>",
            "<t:SomethingNew>ignored</t:SomethingNew>",
            "</t:Message>"
        )))
        .unwrap();

        assert_eq!(item.kind(), ItemKind::Message);
        assert!(!item.is_new());
        assert!(!item.is_dirty());
        assert_eq!(
            item.id().unwrap(),
            Some(&ItemId::new("AAMk", Some("CQAA".to_string())))
        );
        assert_eq!(item.subject().unwrap(), Some("Hello"));
        assert_eq!(item.sensitivity().unwrap(), Some(Sensitivity::Private));
        assert_eq!(item.size().unwrap(), Some(1024));
        assert_eq!(item.is_draft().unwrap(), Some(false));

        // Only what the response contained is known.
        assert!(matches!(item.importance(), Err(Error::PropertyNotLoaded("Importance"))));
    }

    #[test]
    fn unknown_item_types_load_as_plain_items() {
        let item = Item::from_element(&parse_element(
            r#"<t:Note><t:ItemId Id="AAMk"/><t:Subject>Hi</t:Subject></t:Note>"#,
        ))
        .unwrap();

        assert_eq!(item.kind(), ItemKind::Item);
        assert_eq!(item.subject().unwrap(), Some("Hi"));
    }

    fn saved_with_extended_properties() -> Item {
        Item::from_element(&parse_element(concat!(
            "<t:Message>",
            r#"<t:ItemId Id="AAMk" ChangeKey="CQAA"/>"#,
            "<t:ExtendedProperty>",
            r#"<t:ExtendedFieldURI PropertyTag="0x1090" PropertyType="Integer"/>"#,
            "<t:Value>2</t:Value>",
            "</t:ExtendedProperty>",
            "<t:Subject>Hello</t:Subject>",
            "<t:ExtendedProperty>",
            r#"<t:ExtendedFieldURI PropertyTag="0x3613" PropertyType="String"/>"#,
            "<t:Value>IPM.Note</t:Value>",
            "</t:ExtendedProperty>",
            "</t:Message>"
        )))
        .unwrap()
    }

    fn write_updates(item: &Item) -> String {
        write_to_string(|writer| {
            item.write_updates_to_xml(writer, ExchangeServerVersion::Exchange2013_SP1)
        })
    }

    #[test]
    fn repeated_extended_properties_load_into_one_collection() {
        let item = saved_with_extended_properties();

        let properties = item.extended_properties().unwrap().unwrap();
        assert_eq!(properties.len(), 2);
        assert_eq!(
            properties.get(&ExtendedPropertyDefinition::tagged(
                0x3613,
                MapiPropertyType::String
            )),
            Some(&ExtendedPropertyValue::Single("IPM.Note".into()))
        );
        assert_eq!(item.subject().unwrap(), Some("Hello"));
        assert!(!item.is_dirty());
    }

    #[test]
    fn deleting_extended_properties_deletes_each_one() {
        let mut item = saved_with_extended_properties();
        item.property_bag_mut()
            .delete(&item_schema::EXTENDED_PROPERTIES)
            .unwrap();

        assert!(item.extended_properties().unwrap().unwrap().is_empty());
        assert_eq!(
            write_updates(&item),
            concat!(
                r#"<t:DeleteItemField><t:ExtendedFieldURI PropertyTag="0x1090" PropertyType="Integer"/></t:DeleteItemField>"#,
                r#"<t:DeleteItemField><t:ExtendedFieldURI PropertyTag="0x3613" PropertyType="String"/></t:DeleteItemField>"#,
            )
        );
    }

    #[test]
    fn deleting_unloaded_extended_properties_is_refused() {
        let mut item = Item::from_element(&parse_element(
            r#"<t:Message><t:ItemId Id="AAMk" ChangeKey="CQAA"/></t:Message>"#,
        ))
        .unwrap();

        assert!(matches!(
            item.property_bag_mut()
                .delete(&item_schema::EXTENDED_PROPERTIES),
            Err(Error::PropertyNotLoaded("ExtendedProperty"))
        ));
        assert!(!item.is_dirty());
    }

    #[test]
    fn replacing_extended_properties_deletes_dropped_ones() {
        let mut item = saved_with_extended_properties();

        let mut replacement = ExtendedPropertyCollection::new();
        replacement.set(
            ExtendedPropertyDefinition::tagged(0x3613, MapiPropertyType::String),
            "IPM.Note.Custom",
        );
        item.property_bag_mut()
            .set(&item_schema::EXTENDED_PROPERTIES, replacement)
            .unwrap();

        assert_eq!(item.extended_properties().unwrap().unwrap().len(), 1);
        assert_eq!(
            write_updates(&item),
            concat!(
                r#"<t:SetItemField><t:ExtendedFieldURI PropertyTag="0x3613" PropertyType="String"/>"#,
                "<t:Message><t:ExtendedProperty>",
                r#"<t:ExtendedFieldURI PropertyTag="0x3613" PropertyType="String"/>"#,
                "<t:Value>IPM.Note.Custom</t:Value>",
                "</t:ExtendedProperty></t:Message>",
                "</t:SetItemField>",
                r#"<t:DeleteItemField><t:ExtendedFieldURI PropertyTag="0x1090" PropertyType="Integer"/></t:DeleteItemField>"#,
            )
        );
    }

    #[test]
    fn unloaded_lists_are_not_created_on_saved_items() {
        let mut item = Item::from_element(&parse_element(
            r#"<t:Message><t:ItemId Id="AAMk" ChangeKey="CQAA"/></t:Message>"#,
        ))
        .unwrap();

        assert!(matches!(
            item.categories(),
            Err(Error::PropertyNotLoaded("Categories"))
        ));
        assert!(matches!(
            item.categories_mut(),
            Err(Error::PropertyNotLoaded("Categories"))
        ));
        assert!(!item.is_dirty());

        // Extended properties are set one by one, so the server's others
        // are left alone.
        item.extended_properties_mut().unwrap().set(
            ExtendedPropertyDefinition::tagged(0x1090, MapiPropertyType::Integer),
            "1",
        );
        assert_eq!(
            write_updates(&item),
            concat!(
                r#"<t:SetItemField><t:ExtendedFieldURI PropertyTag="0x1090" PropertyType="Integer"/>"#,
                "<t:Message><t:ExtendedProperty>",
                r#"<t:ExtendedFieldURI PropertyTag="0x1090" PropertyType="Integer"/>"#,
                "<t:Value>1</t:Value>",
                "</t:ExtendedProperty></t:Message>",
                "</t:SetItemField>",
            )
        );
    }

    #[test]
    fn kinds_pick_schemas() {
        assert_eq!(ItemKind::MeetingRequest.schema().name(), "EmailMessage");
        assert_eq!(ItemKind::Contact.schema().name(), "Contact");
        assert_eq!(ItemKind::Task.schema().name(), "Item");
    }
}
