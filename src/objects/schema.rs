/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The property schemas of the supported service objects.
//!
//! Definitions within a schema are listed in the order the EWS types schema
//! requires their elements to appear in.

use crate::{
    property::{PropertyDefinition, PropertyFlags, PropertyKind, ServiceObjectSchema},
    types::server_version::ExchangeServerVersion,
};

macro_rules! definitions {
    ($(
        $(#[$meta:meta])*
        $name:ident: $element:literal, $uri:literal, $flags:expr, $version:ident, $kind:expr;
    )*) => {
        $(
            $(#[$meta])*
            pub static $name: PropertyDefinition = PropertyDefinition::new(
                $element,
                $uri,
                $flags,
                ExchangeServerVersion::$version,
                $kind,
            );
        )*
    };
}

const CAN_SET_UPDATE: PropertyFlags = PropertyFlags::CAN_SET.union(PropertyFlags::CAN_UPDATE);

/// Properties shared by every kind of item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/item>
pub mod item_schema {
    use super::*;
    use crate::types::{Importance, Sensitivity};

    definitions! {
        MIME_CONTENT: "MimeContent", "item:MimeContent",
            CAN_SET_UPDATE.union(PropertyFlags::MUST_BE_EXPLICITLY_LOADED),
            Exchange2007_SP1, PropertyKind::MimeContent;
        ITEM_ID: "ItemId", "item:ItemId", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::ItemId;
        PARENT_FOLDER_ID: "ParentFolderId", "item:ParentFolderId", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::FolderId;
        ITEM_CLASS: "ItemClass", "item:ItemClass", PropertyFlags::SET_UPDATE,
            Exchange2007_SP1, PropertyKind::String;
        SUBJECT: "Subject", "item:Subject", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        SENSITIVITY: "Sensitivity", "item:Sensitivity", PropertyFlags::SET_UPDATE,
            Exchange2007_SP1, PropertyKind::Enum(Sensitivity::VALUES);
        BODY: "Body", "item:Body", CAN_SET_UPDATE.union(PropertyFlags::CAN_DELETE),
            Exchange2007_SP1, PropertyKind::Body;
        DATE_TIME_RECEIVED: "DateTimeReceived", "item:DateTimeReceived", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::DateTime;
        SIZE: "Size", "item:Size", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::Integer;
        CATEGORIES: "Categories", "item:Categories", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::StringList;
        IMPORTANCE: "Importance", "item:Importance", PropertyFlags::SET_UPDATE,
            Exchange2007_SP1, PropertyKind::Enum(Importance::VALUES);
        IN_REPLY_TO: "InReplyTo", "item:InReplyTo", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        IS_SUBMITTED: "IsSubmitted", "item:IsSubmitted", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::Boolean;
        IS_DRAFT: "IsDraft", "item:IsDraft", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::Boolean;
        IS_FROM_ME: "IsFromMe", "item:IsFromMe", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::Boolean;
        IS_RESEND: "IsResend", "item:IsResend", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::Boolean;
        IS_UNMODIFIED: "IsUnmodified", "item:IsUnmodified", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::Boolean;
        INTERNET_MESSAGE_HEADERS: "InternetMessageHeaders", "item:InternetMessageHeaders",
            PropertyFlags::READ_ONLY, Exchange2007_SP1, PropertyKind::InternetHeaders;
        DATE_TIME_SENT: "DateTimeSent", "item:DateTimeSent", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::DateTime;
        DATE_TIME_CREATED: "DateTimeCreated", "item:DateTimeCreated", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::DateTime;
        REMINDER_DUE_BY: "ReminderDueBy", "item:ReminderDueBy", PropertyFlags::SET_UPDATE,
            Exchange2007_SP1, PropertyKind::DateTime;
        IS_REMINDER_SET: "ReminderIsSet", "item:ReminderIsSet", PropertyFlags::SET_UPDATE,
            Exchange2007_SP1, PropertyKind::Boolean;
        REMINDER_MINUTES_BEFORE_START: "ReminderMinutesBeforeStart",
            "item:ReminderMinutesBeforeStart", PropertyFlags::SET_UPDATE,
            Exchange2007_SP1, PropertyKind::Integer;
        DISPLAY_CC: "DisplayCc", "item:DisplayCc", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::String;
        DISPLAY_TO: "DisplayTo", "item:DisplayTo", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::String;
        HAS_ATTACHMENTS: "HasAttachments", "item:HasAttachments", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::Boolean;
        /// Extended properties are addressed one by one through
        /// `ExtendedFieldURI` paths; the URI here is never written.
        EXTENDED_PROPERTIES: "ExtendedProperty", "item:ExtendedProperty",
            CAN_SET_UPDATE.union(PropertyFlags::CAN_DELETE),
            Exchange2007_SP1, PropertyKind::ExtendedProperties;
        CULTURE: "Culture", "item:Culture", PropertyFlags::SET_UPDATE,
            Exchange2007_SP1, PropertyKind::String;
        LAST_MODIFIED_NAME: "LastModifiedName", "item:LastModifiedName", PropertyFlags::READ_ONLY,
            Exchange2010, PropertyKind::String;
        LAST_MODIFIED_TIME: "LastModifiedTime", "item:LastModifiedTime", PropertyFlags::READ_ONLY,
            Exchange2010, PropertyKind::DateTime;
        IS_ASSOCIATED: "IsAssociated", "item:IsAssociated",
            PropertyFlags::CAN_SET.union(PropertyFlags::CAN_FIND),
            Exchange2010, PropertyKind::Boolean;
        CONVERSATION_ID: "ConversationId", "item:ConversationId", PropertyFlags::READ_ONLY,
            Exchange2010, PropertyKind::ItemId;
        FLAG: "Flag", "item:Flag", PropertyFlags::SET_UPDATE,
            Exchange2013, PropertyKind::Flag;
        PREVIEW: "Preview", "item:Preview", PropertyFlags::READ_ONLY,
            Exchange2013, PropertyKind::String;
    }
}

/// Properties of messages, on top of the item properties.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/message-ex15websvcsotherref>
pub mod email_message_schema {
    use super::*;

    definitions! {
        SENDER: "Sender", "message:Sender", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::Mailbox;
        TO_RECIPIENTS: "ToRecipients", "message:ToRecipients", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::Recipients;
        CC_RECIPIENTS: "CcRecipients", "message:CcRecipients", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::Recipients;
        BCC_RECIPIENTS: "BccRecipients", "message:BccRecipients", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::Recipients;
        IS_READ_RECEIPT_REQUESTED: "IsReadReceiptRequested", "message:IsReadReceiptRequested",
            PropertyFlags::SET_UPDATE, Exchange2007_SP1, PropertyKind::Boolean;
        IS_DELIVERY_RECEIPT_REQUESTED: "IsDeliveryReceiptRequested",
            "message:IsDeliveryReceiptRequested", PropertyFlags::SET_UPDATE,
            Exchange2007_SP1, PropertyKind::Boolean;
        CONVERSATION_INDEX: "ConversationIndex", "message:ConversationIndex",
            PropertyFlags::READ_ONLY, Exchange2007_SP1, PropertyKind::String;
        CONVERSATION_TOPIC: "ConversationTopic", "message:ConversationTopic",
            PropertyFlags::READ_ONLY, Exchange2007_SP1, PropertyKind::String;
        FROM: "From", "message:From", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::Mailbox;
        INTERNET_MESSAGE_ID: "InternetMessageId", "message:InternetMessageId",
            PropertyFlags::READ_ONLY, Exchange2007_SP1, PropertyKind::String;
        IS_READ: "IsRead", "message:IsRead", PropertyFlags::SET_UPDATE,
            Exchange2007_SP1, PropertyKind::Boolean;
        IS_RESPONSE_REQUESTED: "IsResponseRequested", "message:IsResponseRequested",
            PropertyFlags::READ_WRITE, Exchange2007_SP1, PropertyKind::Boolean;
        REFERENCES: "References", "message:References", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        REPLY_TO: "ReplyTo", "message:ReplyTo", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::Recipients;
        RECEIVED_BY: "ReceivedBy", "message:ReceivedBy", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::Mailbox;
        RECEIVED_REPRESENTING: "ReceivedRepresenting", "message:ReceivedRepresenting",
            PropertyFlags::READ_ONLY, Exchange2007_SP1, PropertyKind::Mailbox;
    }
}

/// Properties of contacts, on top of the item properties.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/contact>
pub mod contact_schema {
    use super::*;

    definitions! {
        FILE_AS: "FileAs", "contacts:FileAs", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        DISPLAY_NAME: "DisplayName", "contacts:DisplayName", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        GIVEN_NAME: "GivenName", "contacts:GivenName", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        INITIALS: "Initials", "contacts:Initials", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        MIDDLE_NAME: "MiddleName", "contacts:MiddleName", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        NICKNAME: "Nickname", "contacts:Nickname", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        COMPANY_NAME: "CompanyName", "contacts:CompanyName", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        /// Entries are updated one by one through `contacts:EmailAddress`
        /// indexed paths.
        EMAIL_ADDRESSES: "EmailAddresses", "contacts:EmailAddresses", CAN_SET_UPDATE,
            Exchange2007_SP1, PropertyKind::EmailAddresses;
        PHYSICAL_ADDRESSES: "PhysicalAddresses", "contacts:PhysicalAddresses", CAN_SET_UPDATE,
            Exchange2007_SP1, PropertyKind::PhysicalAddresses;
        PHONE_NUMBERS: "PhoneNumbers", "contacts:PhoneNumbers", CAN_SET_UPDATE,
            Exchange2007_SP1, PropertyKind::PhoneNumbers;
        ASSISTANT_NAME: "AssistantName", "contacts:AssistantName", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        BIRTHDAY: "Birthday", "contacts:Birthday", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::DateTime;
        BUSINESS_HOME_PAGE: "BusinessHomePage", "contacts:BusinessHomePage",
            PropertyFlags::READ_WRITE, Exchange2007_SP1, PropertyKind::String;
        CHILDREN: "Children", "contacts:Children", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::StringList;
        COMPANIES: "Companies", "contacts:Companies", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::StringList;
        DEPARTMENT: "Department", "contacts:Department", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        GENERATION: "Generation", "contacts:Generation", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        IM_ADDRESSES: "ImAddresses", "contacts:ImAddresses", CAN_SET_UPDATE,
            Exchange2007_SP1, PropertyKind::ImAddresses;
        JOB_TITLE: "JobTitle", "contacts:JobTitle", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        MANAGER: "Manager", "contacts:Manager", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        OFFICE_LOCATION: "OfficeLocation", "contacts:OfficeLocation", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        PROFESSION: "Profession", "contacts:Profession", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        SPOUSE_NAME: "SpouseName", "contacts:SpouseName", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        SURNAME: "Surname", "contacts:Surname", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
    }
}

/// Properties of folders.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/folder>
pub mod folder_schema {
    use super::*;

    definitions! {
        FOLDER_ID: "FolderId", "folder:FolderId", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::FolderId;
        PARENT_FOLDER_ID: "ParentFolderId", "folder:ParentFolderId", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::FolderId;
        FOLDER_CLASS: "FolderClass", "folder:FolderClass", PropertyFlags::SET_UPDATE,
            Exchange2007_SP1, PropertyKind::String;
        DISPLAY_NAME: "DisplayName", "folder:DisplayName", PropertyFlags::READ_WRITE,
            Exchange2007_SP1, PropertyKind::String;
        TOTAL_COUNT: "TotalCount", "folder:TotalCount", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::Integer;
        CHILD_FOLDER_COUNT: "ChildFolderCount", "folder:ChildFolderCount",
            PropertyFlags::READ_ONLY, Exchange2007_SP1, PropertyKind::Integer;
        EXTENDED_PROPERTIES: "ExtendedProperty", "folder:ExtendedProperty",
            CAN_SET_UPDATE.union(PropertyFlags::CAN_DELETE),
            Exchange2007_SP1, PropertyKind::ExtendedProperties;
        UNREAD_COUNT: "UnreadCount", "folder:UnreadCount", PropertyFlags::READ_ONLY,
            Exchange2007_SP1, PropertyKind::Integer;
    }
}

pub static ITEM_SCHEMA: ServiceObjectSchema = ServiceObjectSchema::new(
    "Item",
    None,
    &[
        &item_schema::MIME_CONTENT,
        &item_schema::ITEM_ID,
        &item_schema::PARENT_FOLDER_ID,
        &item_schema::ITEM_CLASS,
        &item_schema::SUBJECT,
        &item_schema::SENSITIVITY,
        &item_schema::BODY,
        &item_schema::DATE_TIME_RECEIVED,
        &item_schema::SIZE,
        &item_schema::CATEGORIES,
        &item_schema::IMPORTANCE,
        &item_schema::IN_REPLY_TO,
        &item_schema::IS_SUBMITTED,
        &item_schema::IS_DRAFT,
        &item_schema::IS_FROM_ME,
        &item_schema::IS_RESEND,
        &item_schema::IS_UNMODIFIED,
        &item_schema::INTERNET_MESSAGE_HEADERS,
        &item_schema::DATE_TIME_SENT,
        &item_schema::DATE_TIME_CREATED,
        &item_schema::REMINDER_DUE_BY,
        &item_schema::IS_REMINDER_SET,
        &item_schema::REMINDER_MINUTES_BEFORE_START,
        &item_schema::DISPLAY_CC,
        &item_schema::DISPLAY_TO,
        &item_schema::HAS_ATTACHMENTS,
        &item_schema::EXTENDED_PROPERTIES,
        &item_schema::CULTURE,
        &item_schema::LAST_MODIFIED_NAME,
        &item_schema::LAST_MODIFIED_TIME,
        &item_schema::IS_ASSOCIATED,
        &item_schema::CONVERSATION_ID,
        &item_schema::FLAG,
        &item_schema::PREVIEW,
    ],
    Some(&item_schema::ITEM_ID),
);

pub static EMAIL_MESSAGE_SCHEMA: ServiceObjectSchema = ServiceObjectSchema::new(
    "EmailMessage",
    Some(&ITEM_SCHEMA),
    &[
        &email_message_schema::SENDER,
        &email_message_schema::TO_RECIPIENTS,
        &email_message_schema::CC_RECIPIENTS,
        &email_message_schema::BCC_RECIPIENTS,
        &email_message_schema::IS_READ_RECEIPT_REQUESTED,
        &email_message_schema::IS_DELIVERY_RECEIPT_REQUESTED,
        &email_message_schema::CONVERSATION_INDEX,
        &email_message_schema::CONVERSATION_TOPIC,
        &email_message_schema::FROM,
        &email_message_schema::INTERNET_MESSAGE_ID,
        &email_message_schema::IS_READ,
        &email_message_schema::IS_RESPONSE_REQUESTED,
        &email_message_schema::REFERENCES,
        &email_message_schema::REPLY_TO,
        &email_message_schema::RECEIVED_BY,
        &email_message_schema::RECEIVED_REPRESENTING,
    ],
    None,
);

pub static CONTACT_SCHEMA: ServiceObjectSchema = ServiceObjectSchema::new(
    "Contact",
    Some(&ITEM_SCHEMA),
    &[
        &contact_schema::FILE_AS,
        &contact_schema::DISPLAY_NAME,
        &contact_schema::GIVEN_NAME,
        &contact_schema::INITIALS,
        &contact_schema::MIDDLE_NAME,
        &contact_schema::NICKNAME,
        &contact_schema::COMPANY_NAME,
        &contact_schema::EMAIL_ADDRESSES,
        &contact_schema::PHYSICAL_ADDRESSES,
        &contact_schema::PHONE_NUMBERS,
        &contact_schema::ASSISTANT_NAME,
        &contact_schema::BIRTHDAY,
        &contact_schema::BUSINESS_HOME_PAGE,
        &contact_schema::CHILDREN,
        &contact_schema::COMPANIES,
        &contact_schema::DEPARTMENT,
        &contact_schema::GENERATION,
        &contact_schema::IM_ADDRESSES,
        &contact_schema::JOB_TITLE,
        &contact_schema::MANAGER,
        &contact_schema::OFFICE_LOCATION,
        &contact_schema::PROFESSION,
        &contact_schema::SPOUSE_NAME,
        &contact_schema::SURNAME,
    ],
    None,
);

pub static FOLDER_SCHEMA: ServiceObjectSchema = ServiceObjectSchema::new(
    "Folder",
    None,
    &[
        &folder_schema::FOLDER_ID,
        &folder_schema::PARENT_FOLDER_ID,
        &folder_schema::FOLDER_CLASS,
        &folder_schema::DISPLAY_NAME,
        &folder_schema::TOTAL_COUNT,
        &folder_schema::CHILD_FOLDER_COUNT,
        &folder_schema::EXTENDED_PROPERTIES,
        &folder_schema::UNREAD_COUNT,
    ],
    Some(&folder_schema::FOLDER_ID),
);

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn derived_schemas_list_item_properties_first() {
        let definitions = EMAIL_MESSAGE_SCHEMA.definitions();
        let item_count = ITEM_SCHEMA.definitions().len();
        assert_eq!(definitions.len(), item_count + 16);
        assert_eq!(definitions[0].xml_element_name(), "MimeContent");
        assert_eq!(
            definitions[item_count].xml_element_name(),
            "Sender"
        );

        assert_eq!(
            CONTACT_SCHEMA.id_property(),
            Some(&item_schema::ITEM_ID)
        );
        assert_eq!(
            FOLDER_SCHEMA.extended_properties(),
            Some(&folder_schema::EXTENDED_PROPERTIES)
        );
    }

    #[test]
    fn field_uris_are_unique_per_schema() {
        for schema in [&EMAIL_MESSAGE_SCHEMA, &CONTACT_SCHEMA, &FOLDER_SCHEMA] {
            let definitions = schema.definitions();
            let uris: HashSet<_> = definitions.iter().map(|d| d.uri()).collect();
            let names: HashSet<_> = definitions.iter().map(|d| d.xml_element_name()).collect();

            assert_eq!(uris.len(), definitions.len(), "{}", schema.name());
            assert_eq!(names.len(), definitions.len(), "{}", schema.name());
        }
    }

    #[test]
    fn mime_content_is_not_a_first_class_property() {
        let first_class = ITEM_SCHEMA.first_class_properties();
        assert!(!first_class.contains(&&item_schema::MIME_CONTENT));
        assert!(first_class.contains(&&item_schema::SUBJECT));
    }

    #[test]
    fn finds_definitions_by_element_name() {
        assert_eq!(
            CONTACT_SCHEMA.find("DisplayName"),
            Some(&contact_schema::DISPLAY_NAME)
        );
        assert_eq!(CONTACT_SCHEMA.find("Subject"), Some(&item_schema::SUBJECT));
        assert_eq!(ITEM_SCHEMA.find("DisplayName"), None);
    }
}
