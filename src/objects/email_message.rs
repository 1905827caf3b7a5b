/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::ops::{Deref, DerefMut};

use crate::{
    complex::{Mailbox, Recipients},
    property::{PropertyBag, UpdateTarget},
    Error,
};

use super::{schema::email_message_schema, Item, ItemKind, ServiceObject, EMAIL_MESSAGE_SCHEMA};

/// A message, or one of the meeting messages derived from it.
///
/// The item properties are reached through [`Deref`] to [`Item`].
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/message-ex15websvcsotherref>
#[derive(Clone, Debug)]
pub struct EmailMessage {
    item: Item,
}

impl EmailMessage {
    pub fn new() -> Self {
        Self {
            item: Item::new(ItemKind::Message),
        }
    }

    pub fn into_item(self) -> Item {
        self.item
    }

    complex_property!(sender, set_sender, email_message_schema::SENDER, Mailbox);
    collection_property!(
        to_recipients,
        to_recipients_mut,
        email_message_schema::TO_RECIPIENTS,
        Recipients
    );
    collection_property!(
        cc_recipients,
        cc_recipients_mut,
        email_message_schema::CC_RECIPIENTS,
        Recipients
    );
    collection_property!(
        bcc_recipients,
        bcc_recipients_mut,
        email_message_schema::BCC_RECIPIENTS,
        Recipients
    );
    copy_property!(
        is_read_receipt_requested,
        set_is_read_receipt_requested,
        email_message_schema::IS_READ_RECEIPT_REQUESTED,
        bool
    );
    copy_property!(
        is_delivery_receipt_requested,
        set_is_delivery_receipt_requested,
        email_message_schema::IS_DELIVERY_RECEIPT_REQUESTED,
        bool
    );
    string_property!(
        /// The base64-encoded index of the message in its conversation.
        conversation_index, email_message_schema::CONVERSATION_INDEX
    );
    string_property!(conversation_topic, email_message_schema::CONVERSATION_TOPIC);
    complex_property!(from, set_from, email_message_schema::FROM, Mailbox);
    string_property!(internet_message_id, email_message_schema::INTERNET_MESSAGE_ID);
    copy_property!(is_read, set_is_read, email_message_schema::IS_READ, bool);
    copy_property!(
        is_response_requested,
        set_is_response_requested,
        email_message_schema::IS_RESPONSE_REQUESTED,
        bool
    );
    string_property!(references, set_references, email_message_schema::REFERENCES);
    collection_property!(reply_to, reply_to_mut, email_message_schema::REPLY_TO, Recipients);
    complex_property!(received_by, email_message_schema::RECEIVED_BY, Mailbox);
    complex_property!(
        received_representing,
        email_message_schema::RECEIVED_REPRESENTING,
        Mailbox
    );
}

impl Default for EmailMessage {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for EmailMessage {
    type Target = Item;

    fn deref(&self) -> &Item {
        &self.item
    }
}

impl DerefMut for EmailMessage {
    fn deref_mut(&mut self) -> &mut Item {
        &mut self.item
    }
}

impl TryFrom<Item> for EmailMessage {
    type Error = Error;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        if std::ptr::eq(item.schema(), &EMAIL_MESSAGE_SCHEMA) {
            Ok(Self { item })
        } else {
            Err(Error::InvalidValue {
                kind: "EmailMessage",
                value: item.kind().to_string(),
            })
        }
    }
}

impl From<EmailMessage> for Item {
    fn from(message: EmailMessage) -> Self {
        message.item
    }
}

impl ServiceObject for EmailMessage {
    fn property_bag(&self) -> &PropertyBag {
        self.item.property_bag()
    }

    fn property_bag_mut(&mut self) -> &mut PropertyBag {
        self.item.property_bag_mut()
    }

    fn xml_element_name(&self) -> &'static str {
        self.item.xml_element_name()
    }

    fn update_target(&self) -> UpdateTarget {
        self.item.update_target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        complex::Mailbox,
        test_utils::{parse_element, write_to_string},
        types::server_version::ExchangeServerVersion,
    };

    #[test]
    fn writes_recipients_and_item_properties() {
        let mut message = EmailMessage::new();
        message.set_subject("Lunch?").unwrap();
        message
            .to_recipients_mut()
            .unwrap()
            .push(Mailbox::with_name("Alex", "alex@example.com"));
        message.set_is_read(false).unwrap();

        let written = write_to_string(|writer| {
            message.write_to_xml(writer, ExchangeServerVersion::Exchange2013_SP1)
        });
        assert_eq!(
            written,
            concat!(
                "<t:Message>",
                "<t:Subject>Lunch?</t:Subject>",
                "<t:ToRecipients><t:Mailbox><t:Name>Alex</t:Name>",
                "<t:EmailAddress>alex@example.com</t:EmailAddress></t:Mailbox></t:ToRecipients>",
                "<t:IsRead>false</t:IsRead>",
                "</t:Message>"
            )
        );
    }

    #[test]
    fn converts_from_items_of_message_kinds_only() {
        let request = Item::from_element(&parse_element(
            r#"<t:MeetingRequest><t:ItemId Id="AAMk"/><t:IsRead>true</t:IsRead></t:MeetingRequest>"#,
        ))
        .unwrap();
        let request = EmailMessage::try_from(request).unwrap();
        assert_eq!(request.is_read().unwrap(), Some(true));
        assert_eq!(request.xml_element_name(), "MeetingRequest");

        let task = Item::new(ItemKind::Task);
        assert!(matches!(
            EmailMessage::try_from(task),
            Err(Error::InvalidValue { kind: "EmailMessage", .. })
        ));
    }

    #[test]
    fn message_properties_are_not_available_on_plain_items() {
        let mut item = Item::new(ItemKind::Item);
        assert!(matches!(
            item.property_bag_mut().set(&email_message_schema::IS_READ, true),
            Err(Error::PropertyNotInSchema { property: "IsRead", schema: "Item" })
        ));
    }
}
