/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::hash::{Hash, Hasher};

use bitflags::bitflags;

use crate::{
    complex::{
        EmailAddressDictionary, ExtendedProperty, ExtendedPropertyCollection, Flag,
        ImAddressDictionary, InternetMessageHeaders, Mailbox, MessageBody, MimeContent,
        PhoneNumberDictionary, PhysicalAddressDictionary, Recipients, StringList,
    },
    types::{server_version::ExchangeServerVersion, DateTime, FolderId, ItemId, PathToElement},
    xml::{parse_bool, XmlElement},
    Error,
};

use super::PropertyValue;

bitflags! {
    /// What a property definition allows callers to do with its value.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        /// The property can be given a value on an object that has not been
        /// saved yet.
        const CAN_SET = 1 << 0;

        /// The property can be changed on a saved object.
        const CAN_UPDATE = 1 << 1;

        /// The property can be removed from a saved object.
        const CAN_DELETE = 1 << 2;

        /// The property can be used in search restrictions.
        const CAN_FIND = 1 << 3;

        /// The server only returns the property when it is named explicitly
        /// in a shape.
        const MUST_BE_EXPLICITLY_LOADED = 1 << 4;
    }
}

impl PropertyFlags {
    /// Server-computed properties.
    pub const READ_ONLY: Self = Self::CAN_FIND;

    /// Properties the client fully controls.
    pub const READ_WRITE: Self = Self::CAN_SET
        .union(Self::CAN_UPDATE)
        .union(Self::CAN_DELETE)
        .union(Self::CAN_FIND);

    /// Properties which must always have a value once set.
    pub const SET_UPDATE: Self = Self::CAN_SET
        .union(Self::CAN_UPDATE)
        .union(Self::CAN_FIND);
}

/// The shape of the values a property holds, which decides how they are read
/// from XML and which [`PropertyValue`]s are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    String,
    Boolean,
    Integer,
    DateTime,
    /// Text restricted to the listed values.
    Enum(&'static [&'static str]),
    ItemId,
    FolderId,
    Body,
    MimeContent,
    /// A single mailbox wrapped in the property element, e.g. `From`.
    Mailbox,
    Recipients,
    StringList,
    /// Repeated `ExtendedProperty` elements directly inside the object.
    ExtendedProperties,
    InternetHeaders,
    Flag,
    EmailAddresses,
    PhoneNumbers,
    ImAddresses,
    PhysicalAddresses,
}

impl PropertyKind {
    /// Reads the value of a property element.
    pub(crate) fn read(&self, element: &XmlElement) -> Result<PropertyValue, Error> {
        let value = match self {
            PropertyKind::String => PropertyValue::String(element.text().to_owned()),
            PropertyKind::Boolean => PropertyValue::Boolean(parse_bool(element.text())?),
            PropertyKind::Integer => PropertyValue::Integer(element.parse_text()?),
            PropertyKind::DateTime => PropertyValue::DateTime(element.text().parse::<DateTime>()?),
            PropertyKind::Enum(values) => {
                let text = element.text().trim();
                if !values.contains(&text) {
                    log::debug!(
                        "unrecognized value `{text}` for element `{}`",
                        element.name()
                    );
                }

                // Keep values newer servers may send rather than failing the
                // whole object; only writes are restricted.
                PropertyValue::String(text.to_owned())
            }
            PropertyKind::ItemId => PropertyValue::ItemId(ItemId::from_element(element)?),
            PropertyKind::FolderId => {
                // Parent folder ids are sent as `ParentFolderId` elements
                // with the same attributes as `FolderId`.
                PropertyValue::FolderId(FolderId::from_element(element)?)
            }
            PropertyKind::Body => PropertyValue::Body(MessageBody::load_from_xml(element)?),
            PropertyKind::MimeContent => {
                PropertyValue::MimeContent(MimeContent::load_from_xml(element)?)
            }
            PropertyKind::Mailbox => {
                let mailbox = element.required_child("Mailbox")?;
                PropertyValue::Mailbox(Mailbox::load_from_xml(mailbox)?)
            }
            PropertyKind::Recipients => {
                PropertyValue::Recipients(Recipients::load_from_xml(element)?)
            }
            PropertyKind::StringList => {
                PropertyValue::Strings(StringList::load_from_xml(element)?)
            }
            PropertyKind::ExtendedProperties => {
                let property = ExtendedProperty::load_from_xml(element)?;
                PropertyValue::ExtendedProperties(ExtendedPropertyCollection::from_loaded(vec![
                    property,
                ]))
            }
            PropertyKind::InternetHeaders => {
                PropertyValue::InternetHeaders(InternetMessageHeaders::load_from_xml(element)?)
            }
            PropertyKind::Flag => PropertyValue::Flag(Flag::load_from_xml(element)?),
            PropertyKind::EmailAddresses => {
                PropertyValue::EmailAddresses(EmailAddressDictionary::load_from_xml(element)?)
            }
            PropertyKind::PhoneNumbers => {
                PropertyValue::PhoneNumbers(PhoneNumberDictionary::load_from_xml(element)?)
            }
            PropertyKind::ImAddresses => {
                PropertyValue::ImAddresses(ImAddressDictionary::load_from_xml(element)?)
            }
            PropertyKind::PhysicalAddresses => PropertyValue::PhysicalAddresses(
                PhysicalAddressDictionary::load_from_xml(element)?,
            ),
        };

        Ok(value)
    }

    /// Whether a value may be stored under a property of this kind.
    pub(crate) fn accepts(&self, value: &PropertyValue) -> bool {
        match (self, value) {
            (PropertyKind::Enum(values), PropertyValue::String(text)) => {
                values.contains(&text.as_str())
            }
            (PropertyKind::String, PropertyValue::String(_))
            | (PropertyKind::Boolean, PropertyValue::Boolean(_))
            | (PropertyKind::Integer, PropertyValue::Integer(_))
            | (PropertyKind::DateTime, PropertyValue::DateTime(_))
            | (PropertyKind::ItemId, PropertyValue::ItemId(_))
            | (PropertyKind::FolderId, PropertyValue::FolderId(_))
            | (PropertyKind::Body, PropertyValue::Body(_))
            | (PropertyKind::MimeContent, PropertyValue::MimeContent(_))
            | (PropertyKind::Mailbox, PropertyValue::Mailbox(_))
            | (PropertyKind::Recipients, PropertyValue::Recipients(_))
            | (PropertyKind::StringList, PropertyValue::Strings(_))
            | (PropertyKind::ExtendedProperties, PropertyValue::ExtendedProperties(_))
            | (PropertyKind::InternetHeaders, PropertyValue::InternetHeaders(_))
            | (PropertyKind::Flag, PropertyValue::Flag(_))
            | (PropertyKind::EmailAddresses, PropertyValue::EmailAddresses(_))
            | (PropertyKind::PhoneNumbers, PropertyValue::PhoneNumbers(_))
            | (PropertyKind::ImAddresses, PropertyValue::ImAddresses(_))
            | (PropertyKind::PhysicalAddresses, PropertyValue::PhysicalAddresses(_)) => true,
            _ => false,
        }
    }

    /// Whether values are keyed collections, updated and deleted entry by
    /// entry rather than as a whole.
    pub(crate) fn is_keyed(&self) -> bool {
        matches!(
            self,
            PropertyKind::ExtendedProperties
                | PropertyKind::EmailAddresses
                | PropertyKind::PhoneNumbers
                | PropertyKind::ImAddresses
                | PropertyKind::PhysicalAddresses
        )
    }
}

/// A static descriptor for one property of a service object.
///
/// Definitions are identified by their field URI; two definitions with the
/// same URI are the same property.
#[derive(Debug)]
pub struct PropertyDefinition {
    xml_element_name: &'static str,
    uri: &'static str,
    flags: PropertyFlags,
    version: ExchangeServerVersion,
    kind: PropertyKind,
}

impl PropertyDefinition {
    pub const fn new(
        xml_element_name: &'static str,
        uri: &'static str,
        flags: PropertyFlags,
        version: ExchangeServerVersion,
        kind: PropertyKind,
    ) -> Self {
        Self {
            xml_element_name,
            uri,
            flags,
            version,
            kind,
        }
    }

    pub fn xml_element_name(&self) -> &'static str {
        self.xml_element_name
    }

    pub fn uri(&self) -> &'static str {
        self.uri
    }

    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    pub fn has_flag(&self, flag: PropertyFlags) -> bool {
        self.flags.contains(flag)
    }

    /// The first server version which knows this property.
    pub fn version(&self) -> ExchangeServerVersion {
        self.version
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// The path addressing this property in shapes and updates.
    pub fn path(&self) -> PathToElement {
        PathToElement::FieldURI {
            field_uri: self.uri,
        }
    }

    pub(crate) fn check_version(&self, requested: ExchangeServerVersion) -> Result<(), Error> {
        if requested < self.version {
            return Err(Error::PropertyVersion {
                property: self.xml_element_name,
                required: self.version,
                requested,
            });
        }

        Ok(())
    }
}

impl PartialEq for PropertyDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Eq for PropertyDefinition {}

impl Hash for PropertyDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
    }
}
