/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt;
use std::str::FromStr;

use time::format_description::well_known::{Iso8601, Rfc3339};
use time::OffsetDateTime;

use crate::{
    complex::ExtendedPropertyDefinition,
    xml::{EwsXmlWriter, XmlElement, XmlNamespace, NO_ATTRIBUTES},
    Error,
};

pub mod message_xml;
pub use self::message_xml::{
    MessageXml, MessageXmlElement, MessageXmlElements, MessageXmlTagged, MessageXmlValue,
    ServerBusy,
};

/// A date and time with second precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(pub OffsetDateTime);

impl DateTime {
    /// Formats the value the way EWS expects in `xs:dateTime` fields.
    pub fn to_xml_string(&self) -> Result<String, Error> {
        Ok(self.0.format(&Rfc3339)?)
    }
}

impl FromStr for DateTime {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // Exchange normally sends RFC 3339 timestamps, but some fields come
        // back in the more lenient ISO 8601 form.
        let value = value.trim();
        match OffsetDateTime::parse(value, &Rfc3339) {
            Ok(datetime) => Ok(DateTime(datetime)),
            Err(_) => Ok(DateTime(OffsetDateTime::parse(value, &Iso8601::DEFAULT)?)),
        }
    }
}

impl From<OffsetDateTime> for DateTime {
    fn from(value: OffsetDateTime) -> Self {
        DateTime(value)
    }
}

/// The unique identifier of an item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/itemid>
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemId {
    pub id: String,
    pub change_key: Option<String>,
}

/// The unique identifier of a folder.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/folderid>
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FolderId {
    pub id: String,
    pub change_key: Option<String>,
}

macro_rules! impl_id {
    ($name:ident, $element:literal) => {
        impl $name {
            pub fn new(id: impl Into<String>, change_key: Option<String>) -> Self {
                Self {
                    id: id.into(),
                    change_key,
                }
            }

            pub(crate) fn from_element(element: &XmlElement) -> Result<Self, Error> {
                Ok(Self {
                    id: element.required_attribute("Id")?.to_owned(),
                    change_key: element.attribute("ChangeKey").map(str::to_owned),
                })
            }

            pub(crate) fn attributes(&self) -> Vec<(&'static str, &str)> {
                let mut attributes = vec![("Id", self.id.as_str())];
                if let Some(change_key) = &self.change_key {
                    attributes.push(("ChangeKey", change_key.as_str()));
                }

                attributes
            }

            /// Writes this identifier as an element with the given name, e.g.
            /// `ParentFolderId` rather than `FolderId`.
            pub(crate) fn write_as(
                &self,
                writer: &mut EwsXmlWriter,
                namespace: XmlNamespace,
                local_name: &str,
            ) -> Result<(), Error> {
                writer.write_empty_element(namespace, local_name, self.attributes())
            }

            pub(crate) fn write(&self, writer: &mut EwsXmlWriter) -> Result<(), Error> {
                self.write_as(writer, XmlNamespace::Types, $element)
            }
        }
    };
}

impl_id!(ItemId, "ItemId");
impl_id!(FolderId, "FolderId");

text_enum! {
    /// The well-known folders of a mailbox which can be addressed by name.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/distinguishedfolderid>
    pub enum DistinguishedFolderName {
        Calendar = "calendar",
        Contacts = "contacts",
        DeletedItems = "deleteditems",
        Drafts = "drafts",
        Inbox = "inbox",
        Journal = "journal",
        JunkEmail = "junkemail",
        MsgFolderRoot = "msgfolderroot",
        Notes = "notes",
        Outbox = "outbox",
        PublicFoldersRoot = "publicfoldersroot",
        Root = "root",
        SearchFolders = "searchfolders",
        SentItems = "sentitems",
        Tasks = "tasks",
        VoiceMail = "voicemail",
        ArchiveRoot = "archiveroot",
        ArchiveMsgFolderRoot = "archivemsgfolderroot",
        RecoverableItemsRoot = "recoverableitemsroot",
    }
}

/// An identifier for an Exchange folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BaseFolderId {
    /// An identifier for an arbitrary folder.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/folderid>.
    FolderId(FolderId),

    /// An identifier for referencing a folder by name, e.g. "inbox" or
    /// "junkemail", optionally in a mailbox other than the caller's own.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/distinguishedfolderid>.
    DistinguishedFolderId {
        id: DistinguishedFolderName,
        change_key: Option<String>,
        mailbox: Option<String>,
    },
}

impl BaseFolderId {
    pub(crate) fn write(&self, writer: &mut EwsXmlWriter) -> Result<(), Error> {
        match self {
            BaseFolderId::FolderId(folder_id) => folder_id.write(writer),
            BaseFolderId::DistinguishedFolderId {
                id,
                change_key,
                mailbox,
            } => {
                let mut attributes = vec![("Id", id.as_str())];
                if let Some(change_key) = change_key {
                    attributes.push(("ChangeKey", change_key.as_str()));
                }

                match mailbox {
                    Some(address) => writer.write_element_with(
                        XmlNamespace::Types,
                        "DistinguishedFolderId",
                        attributes,
                        |writer| {
                            writer.write_element_with(
                                XmlNamespace::Types,
                                "Mailbox",
                                NO_ATTRIBUTES,
                                |writer| {
                                    writer.write_element_value(
                                        XmlNamespace::Types,
                                        "EmailAddress",
                                        address,
                                    )
                                },
                            )
                        },
                    ),
                    None => writer.write_empty_element(
                        XmlNamespace::Types,
                        "DistinguishedFolderId",
                        attributes,
                    ),
                }
            }
        }
    }
}

impl From<FolderId> for BaseFolderId {
    fn from(value: FolderId) -> Self {
        BaseFolderId::FolderId(value)
    }
}

impl From<DistinguishedFolderName> for BaseFolderId {
    fn from(value: DistinguishedFolderName) -> Self {
        BaseFolderId::DistinguishedFolderId {
            id: value,
            change_key: None,
            mailbox: None,
        }
    }
}

/// An identifier for a property on an Exchange entity, as used in shapes and
/// in update requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathToElement {
    /// An identifier for a property given by a well-known string.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/fielduri>
    FieldURI { field_uri: &'static str },

    /// An identifier for a specific element of a dictionary-based property.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/indexedfielduri>
    IndexedFieldURI {
        field_uri: &'static str,
        field_index: &'static str,
    },

    /// An identifier for an extended MAPI property.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/extendedfielduri>
    ExtendedFieldURI(ExtendedPropertyDefinition),
}

impl PathToElement {
    pub(crate) fn write(&self, writer: &mut EwsXmlWriter) -> Result<(), Error> {
        match self {
            PathToElement::FieldURI { field_uri } => writer.write_empty_element(
                XmlNamespace::Types,
                "FieldURI",
                [("FieldURI", *field_uri)],
            ),
            PathToElement::IndexedFieldURI {
                field_uri,
                field_index,
            } => writer.write_empty_element(
                XmlNamespace::Types,
                "IndexedFieldURI",
                [("FieldURI", *field_uri), ("FieldIndex", *field_index)],
            ),
            PathToElement::ExtendedFieldURI(definition) => definition.write(writer),
        }
    }
}

impl fmt::Display for PathToElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathToElement::FieldURI { field_uri } => f.write_str(field_uri),
            PathToElement::IndexedFieldURI {
                field_uri,
                field_index,
            } => write!(f, "{field_uri}[{field_index}]"),
            PathToElement::ExtendedFieldURI(definition) => write!(f, "{definition}"),
        }
    }
}

text_enum! {
    /// The base set of properties to be returned in response to our request.
    /// Additional properties may be specified by the parent element.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/baseshape>.
    #[derive(Default)]
    pub enum BaseShape {
        /// Only the IDs of any items or folders returned.
        IdOnly,

        /// The default set of properties for the relevant item or folder.
        ///
        /// The properties returned are dependent on the type of item or folder. See
        /// the EWS documentation for details.
        #[default]
        Default,

        /// All properties of an item or folder.
        AllProperties,
    }
}

text_enum! {
    /// The action an Exchange server will take upon creating or updating a
    /// `Message` item.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/createitem#messagedisposition-attribute>
    pub enum MessageDisposition {
        SaveOnly,
        SendOnly,
        SendAndSaveCopy,
    }
}

text_enum! {
    /// How the server resolves a conflict between an update and changes made
    /// on the server since the change key was issued.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/updateitem#conflictresolution-attribute>
    #[derive(Default)]
    pub enum ConflictResolution {
        NeverOverwrite,
        #[default]
        AutoResolve,
        AlwaysOverwrite,
    }
}

text_enum! {
    /// The manner in which items or folders are deleted.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/deletetype>
    pub enum DeleteType {
        HardDelete,
        MoveToDeletedItems,
        SoftDelete,
    }
}

text_enum! {
    /// The priority level of an item.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/importance>
    pub enum Importance {
        Low,
        Normal,
        High,
    }
}

text_enum! {
    /// The sensitivity of the contents of an item.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/sensitivity>
    pub enum Sensitivity {
        Normal,
        Personal,
        Private,
        Confidential,
    }
}

text_enum! {
    /// The content type of an item's body.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/body>
    pub enum BodyType {
        HTML,
        Text,
    }
}

text_enum! {
    /// The type of sender or recipient a mailbox represents.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/mailboxtype>
    pub enum MailboxType {
        Mailbox,
        PublicDL,
        PrivateDL,
        Contact,
        PublicFolder,
        Unknown,
        OneOff,
        GroupMailbox,
    }
}

text_enum! {
    /// The value of the flag status for an item.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/flagstatus>
    pub enum FlagStatus {
        NotFlagged,
        Flagged,
        Complete,
    }
}

text_enum! {
    /// A well-known MAPI property set identifier.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/extendedfielduri#distinguishedpropertysetid-attribute>
    pub enum DistinguishedPropertySet {
        Address,
        Appointment,
        CalendarAssistant,
        Common,
        InternetHeaders,
        Meeting,
        PublicStrings,
        Sharing,
        Task,
        UnifiedMessaging,
    }
}

text_enum! {
    /// The type of the value of a MAPI property.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/extendedfielduri#propertytype-attribute>
    pub enum MapiPropertyType {
        ApplicationTime,
        ApplicationTimeArray,
        Binary,
        BinaryArray,
        Boolean,
        CLSID,
        CLSIDArray,
        Currency,
        CurrencyArray,
        Double,
        DoubleArray,
        Float,
        FloatArray,
        Integer,
        IntegerArray,
        Long,
        LongArray,
        Short,
        ShortArray,
        SystemTime,
        SystemTimeArray,
        String,
        StringArray,
    }
}

impl MapiPropertyType {
    /// Whether values of this type are written as a `Values` list rather
    /// than a single `Value`.
    pub fn is_array(&self) -> bool {
        self.as_str().ends_with("Array")
    }
}
