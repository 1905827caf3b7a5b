/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    complex::{
        EmailAddressDictionary, ExtendedPropertyCollection, Flag, ImAddressDictionary,
        InternetMessageHeaders, Mailbox, MessageBody, MimeContent, PhoneNumberDictionary,
        PhysicalAddressDictionary, Recipients, StringList,
    },
    types::{server_version::ExchangeServerVersion, DateTime, FolderId, ItemId},
    xml::{bool_text, EwsXmlWriter, XmlNamespace, NO_ATTRIBUTES},
    Error,
};

use super::{PropertyDefinition, UpdateTarget};

/// A value held in a [`PropertyBag`](super::PropertyBag).
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// Free text, and the text of enumeration values.
    String(String),
    Boolean(bool),
    Integer(i64),
    DateTime(DateTime),
    ItemId(ItemId),
    FolderId(FolderId),
    Body(MessageBody),
    MimeContent(MimeContent),
    Mailbox(Mailbox),
    Recipients(Recipients),
    Strings(StringList),
    ExtendedProperties(ExtendedPropertyCollection),
    InternetHeaders(InternetMessageHeaders),
    Flag(Flag),
    EmailAddresses(EmailAddressDictionary),
    PhoneNumbers(PhoneNumberDictionary),
    ImAddresses(ImAddressDictionary),
    PhysicalAddresses(PhysicalAddressDictionary),
}

impl PropertyValue {
    /// Writes the value as a complete element named `element_name`.
    pub(crate) fn write_to_xml(
        &self,
        writer: &mut EwsXmlWriter,
        element_name: &str,
    ) -> Result<(), Error> {
        let ns = XmlNamespace::Types;
        match self {
            PropertyValue::String(value) => writer.write_element_value(ns, element_name, value),
            PropertyValue::Boolean(value) => {
                writer.write_element_value(ns, element_name, bool_text(*value))
            }
            PropertyValue::Integer(value) => {
                writer.write_element_value(ns, element_name, &value.to_string())
            }
            PropertyValue::DateTime(value) => {
                writer.write_element_value(ns, element_name, &value.to_xml_string()?)
            }
            PropertyValue::ItemId(id) => id.write_as(writer, ns, element_name),
            PropertyValue::FolderId(id) => id.write_as(writer, ns, element_name),
            PropertyValue::Body(body) => body.write_to_xml(writer, element_name),
            PropertyValue::MimeContent(content) => content.write_to_xml(writer, element_name),
            PropertyValue::Mailbox(mailbox) => {
                writer.write_element_with(ns, element_name, NO_ATTRIBUTES, |writer| {
                    mailbox.write_to_xml(writer, "Mailbox")
                })
            }
            PropertyValue::Recipients(recipients) => recipients.write_to_xml(writer, element_name),
            PropertyValue::Strings(strings) => strings.write_to_xml(writer, element_name),
            PropertyValue::ExtendedProperties(properties) => properties.write_to_xml(writer),
            PropertyValue::InternetHeaders(headers) => headers.write_to_xml(writer, element_name),
            PropertyValue::Flag(flag) => flag.write_to_xml(writer, element_name),
            PropertyValue::EmailAddresses(entries) => entries.write_to_xml(writer, element_name),
            PropertyValue::PhoneNumbers(entries) => entries.write_to_xml(writer, element_name),
            PropertyValue::ImAddresses(entries) => entries.write_to_xml(writer, element_name),
            PropertyValue::PhysicalAddresses(entries) => {
                entries.write_to_xml(writer, element_name)
            }
        }
    }

    /// Whether the value records changes made through a mutable borrow
    /// itself, rather than relying on the bag to mark it modified.
    pub(crate) fn tracks_changes(&self) -> bool {
        matches!(
            self,
            PropertyValue::Recipients(_)
                | PropertyValue::Strings(_)
                | PropertyValue::ExtendedProperties(_)
                | PropertyValue::EmailAddresses(_)
                | PropertyValue::PhoneNumbers(_)
                | PropertyValue::ImAddresses(_)
                | PropertyValue::PhysicalAddresses(_)
        )
    }

    pub(crate) fn is_dirty(&self) -> bool {
        match self {
            PropertyValue::Recipients(value) => value.is_dirty(),
            PropertyValue::Strings(value) => value.is_dirty(),
            PropertyValue::ExtendedProperties(value) => value.is_dirty(),
            PropertyValue::EmailAddresses(value) => value.is_dirty(),
            PropertyValue::PhoneNumbers(value) => value.is_dirty(),
            PropertyValue::ImAddresses(value) => value.is_dirty(),
            PropertyValue::PhysicalAddresses(value) => value.is_dirty(),
            _ => false,
        }
    }

    pub(crate) fn clear_change_log(&mut self) {
        match self {
            PropertyValue::Recipients(value) => value.clear_change_log(),
            PropertyValue::Strings(value) => value.clear_change_log(),
            PropertyValue::ExtendedProperties(value) => value.clear_change_log(),
            PropertyValue::EmailAddresses(value) => value.clear_change_log(),
            PropertyValue::PhoneNumbers(value) => value.clear_change_log(),
            PropertyValue::ImAddresses(value) => value.clear_change_log(),
            PropertyValue::PhysicalAddresses(value) => value.clear_change_log(),
            _ => (),
        }
    }

    /// Replaces the entries of a keyed collection with those of `other`,
    /// recording per-entry changes. Any other pair of values is handed back.
    pub(crate) fn replace_entries(&mut self, other: PropertyValue) -> Option<PropertyValue> {
        match (self, other) {
            (PropertyValue::ExtendedProperties(value), PropertyValue::ExtendedProperties(other)) => {
                value.replace_with(other)
            }
            (PropertyValue::EmailAddresses(value), PropertyValue::EmailAddresses(other)) => {
                value.replace_with(other)
            }
            (PropertyValue::PhoneNumbers(value), PropertyValue::PhoneNumbers(other)) => {
                value.replace_with(other)
            }
            (PropertyValue::ImAddresses(value), PropertyValue::ImAddresses(other)) => {
                value.replace_with(other)
            }
            (PropertyValue::PhysicalAddresses(value), PropertyValue::PhysicalAddresses(other)) => {
                value.replace_with(other)
            }
            (_, other) => return Some(other),
        }

        None
    }

    /// Removes every entry of a keyed collection, recording each removal.
    pub(crate) fn remove_all_entries(&mut self) {
        match self {
            PropertyValue::ExtendedProperties(value) => value.remove_all(),
            PropertyValue::EmailAddresses(value) => value.remove_all(),
            PropertyValue::PhoneNumbers(value) => value.remove_all(),
            PropertyValue::ImAddresses(value) => value.remove_all(),
            PropertyValue::PhysicalAddresses(value) => value.remove_all(),
            _ => (),
        }
    }

    /// Whether the value is a list with nothing in it, which is sent as a
    /// deletion rather than an empty element.
    pub(crate) fn is_empty_list(&self) -> bool {
        match self {
            PropertyValue::Recipients(value) => value.is_empty(),
            PropertyValue::Strings(value) => value.is_empty(),
            _ => false,
        }
    }

    /// Writes field updates for this value.
    ///
    /// Keyed collections update entry by entry; everything else is replaced
    /// as a whole. `replaced` is set when the whole value was assigned since
    /// the last load, in which case every entry of a keyed collection is
    /// written.
    pub(crate) fn write_updates(
        &self,
        definition: &'static PropertyDefinition,
        writer: &mut EwsXmlWriter,
        target: &UpdateTarget,
        version: ExchangeServerVersion,
        replaced: bool,
    ) -> Result<(), Error> {
        match self {
            PropertyValue::ExtendedProperties(value) => {
                value.write_updates(writer, target, replaced)
            }
            PropertyValue::EmailAddresses(value) => {
                value.write_updates(definition, writer, target, replaced)
            }
            PropertyValue::PhoneNumbers(value) => {
                value.write_updates(definition, writer, target, replaced)
            }
            PropertyValue::ImAddresses(value) => {
                value.write_updates(definition, writer, target, replaced)
            }
            PropertyValue::PhysicalAddresses(value) => {
                value.write_updates(definition, writer, target, replaced)
            }
            value if value.is_empty_list() => {
                if !definition.has_flag(super::PropertyFlags::CAN_DELETE) {
                    return Err(Error::PropertyNotDeletable(definition.xml_element_name()));
                }
                definition.check_version(version)?;
                target.write_delete_field(writer, &definition.path())
            }
            value => target.write_set_field(writer, &definition.path(), |writer| {
                value.write_to_xml(writer, definition.xml_element_name())
            }),
        }
    }
}

/// A Rust type which can be borrowed out of a [`PropertyValue`].
pub trait PropertyValueType: Sized {
    fn from_value(value: &PropertyValue) -> Option<&Self>;
    fn from_value_mut(value: &mut PropertyValue) -> Option<&mut Self>;
}

macro_rules! impl_value_type {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl PropertyValueType for $ty {
                fn from_value(value: &PropertyValue) -> Option<&Self> {
                    match value {
                        PropertyValue::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn from_value_mut(value: &mut PropertyValue) -> Option<&mut Self> {
                    match value {
                        PropertyValue::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for PropertyValue {
                fn from(value: $ty) -> Self {
                    PropertyValue::$variant(value)
                }
            }
        )*
    };
}

impl_value_type! {
    String(String),
    Boolean(bool),
    Integer(i64),
    DateTime(DateTime),
    ItemId(ItemId),
    FolderId(FolderId),
    Body(MessageBody),
    MimeContent(MimeContent),
    Mailbox(Mailbox),
    Recipients(Recipients),
    Strings(StringList),
    ExtendedProperties(ExtendedPropertyCollection),
    InternetHeaders(InternetMessageHeaders),
    Flag(Flag),
    EmailAddresses(EmailAddressDictionary),
    PhoneNumbers(PhoneNumberDictionary),
    ImAddresses(ImAddressDictionary),
    PhysicalAddresses(PhysicalAddressDictionary),
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_owned())
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Integer(value.into())
    }
}
