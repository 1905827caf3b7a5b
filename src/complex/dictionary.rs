/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt;
use std::str::FromStr;

use crate::{
    property::{PropertyDefinition, UpdateTarget},
    types::PathToElement,
    xml::{EwsXmlWriter, XmlElement, XmlNamespace, NO_ATTRIBUTES},
    Error,
};

use super::ChangeLog;

/// The key type of a [`DictionaryProperty`].
pub trait DictionaryKey: Copy + PartialEq + fmt::Debug + FromStr<Err = Error> {
    /// The field URI entries are addressed with in updates, together with
    /// the key as index.
    const FIELD_URI: &'static str;

    /// The text of the key, used both as the `Key` attribute of entries and
    /// as the `FieldIndex` of update paths.
    fn index(&self) -> &'static str;
}

/// How an entry changed since the dictionary was loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryChange {
    /// The entry did not exist on the server.
    Added,

    /// The entry was assigned a whole new value.
    Replaced,

    /// Parts of the entry were changed in place.
    Modified,
}

/// Where the field updates for a dictionary are written.
#[derive(Clone, Copy, Debug)]
pub struct DictionaryUpdate<'a> {
    pub target: &'a UpdateTarget,

    /// The field URI of single entries, e.g. `contacts:EmailAddress`.
    pub field_uri: &'static str,

    /// The element holding the dictionary, e.g. `EmailAddresses`.
    pub element_name: &'static str,
}

impl DictionaryUpdate<'_> {
    /// Writes a set update for one entry at `path`, with `content` writing the
    /// inside of the `Entry` element.
    pub(crate) fn write_set_entry<K, F>(
        &self,
        writer: &mut EwsXmlWriter,
        path: &PathToElement,
        key: K,
        content: F,
    ) -> Result<(), Error>
    where
        K: DictionaryKey,
        F: FnOnce(&mut EwsXmlWriter) -> Result<(), Error>,
    {
        self.target.write_set_field(writer, path, |writer| {
            writer.write_element_with(
                XmlNamespace::Types,
                self.element_name,
                NO_ATTRIBUTES,
                |writer| {
                    writer.write_element_with(
                        XmlNamespace::Types,
                        "Entry",
                        [("Key", key.index())],
                        content,
                    )
                },
            )
        })
    }
}

/// The value type of a [`DictionaryProperty`].
pub trait DictionaryEntry: Clone + fmt::Debug + PartialEq + Sized {
    /// Whether entries record changes made to them in place.
    const TRACKS_CHANGES: bool = false;

    fn load_from_xml(element: &XmlElement) -> Result<Self, Error>;

    /// Writes the contents of the `Entry` element.
    fn write_contents(&self, writer: &mut EwsXmlWriter) -> Result<(), Error>;

    fn is_dirty(&self) -> bool {
        false
    }

    fn clear_change_log(&mut self) {}

    /// Writes the field updates for a changed entry. By default the whole
    /// entry is set through its indexed path.
    fn write_updates<K: DictionaryKey>(
        &self,
        key: K,
        _change: EntryChange,
        update: &DictionaryUpdate<'_>,
        writer: &mut EwsXmlWriter,
    ) -> Result<(), Error> {
        let path = PathToElement::IndexedFieldURI {
            field_uri: update.field_uri,
            field_index: key.index(),
        };

        update.write_set_entry(writer, &path, key, |writer| self.write_contents(writer))
    }

    /// Writes the field updates removing an entry.
    fn write_deletes<K: DictionaryKey>(
        key: K,
        update: &DictionaryUpdate<'_>,
        writer: &mut EwsXmlWriter,
    ) -> Result<(), Error> {
        let path = PathToElement::IndexedFieldURI {
            field_uri: update.field_uri,
            field_index: key.index(),
        };

        update.target.write_delete_field(writer, &path)
    }
}

impl DictionaryEntry for String {
    fn load_from_xml(element: &XmlElement) -> Result<Self, Error> {
        Ok(element.text().to_owned())
    }

    fn write_contents(&self, writer: &mut EwsXmlWriter) -> Result<(), Error> {
        writer.write_text(self)
    }
}

/// A property holding values indexed by a fixed set of keys, such as the
/// email addresses of a contact.
///
/// Changes are tracked per key, so that an update sets or deletes only the
/// entries which changed.
#[derive(Clone, Debug, PartialEq)]
pub struct DictionaryProperty<K, V> {
    entries: Vec<(K, V)>,
    changes: ChangeLog<K>,
}

impl<K, V> Default for DictionaryProperty<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            changes: ChangeLog::default(),
        }
    }
}

impl<K: DictionaryKey, V: DictionaryEntry> DictionaryProperty<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value)
    }

    /// Mutably borrows an entry. Entries which do not track their own changes
    /// are recorded as replaced.
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        let value = self
            .entries
            .iter_mut()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value)?;

        if !V::TRACKS_CHANGES {
            self.changes.record_set(&key, true);
        }

        Some(value)
    }

    pub fn contains_key(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Sets the entry for `key`, replacing any existing value.
    pub fn set(&mut self, key: K, value: V) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, existing)) => {
                self.changes.record_set(&key, true);
                *existing = value;
            }
            None => {
                self.changes.record_set(&key, false);
                self.entries.push((key, value));
            }
        }
    }

    /// Removes the entry for `key`, returning its value if there was one.
    pub fn remove(&mut self, key: K) -> Option<V> {
        let position = self
            .entries
            .iter()
            .position(|(existing, _)| *existing == key)?;

        self.changes.record_remove(&key);
        Some(self.entries.remove(position).1)
    }

    /// Takes on the entries of `other`, recording the removal of every key
    /// `other` lacks.
    pub(crate) fn replace_with(&mut self, other: DictionaryProperty<K, V>) {
        self.remove_all_except(&other);
        for (key, value) in other.entries {
            self.set(key, value);
        }
    }

    /// Removes every entry, recording each removal.
    pub(crate) fn remove_all(&mut self) {
        self.remove_all_except(&DictionaryProperty::default());
    }

    fn remove_all_except(&mut self, kept: &DictionaryProperty<K, V>) {
        let removed: Vec<K> = self
            .entries
            .iter()
            .map(|(key, _)| *key)
            .filter(|key| !kept.contains_key(*key))
            .collect();

        for key in removed {
            self.remove(key);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        !self.changes.is_empty() || self.entries.iter().any(|(_, value)| value.is_dirty())
    }

    pub fn clear_change_log(&mut self) {
        self.changes.clear();
        for (_, value) in &mut self.entries {
            value.clear_change_log();
        }
    }

    pub(crate) fn load_from_xml(element: &XmlElement) -> Result<Self, Error> {
        let mut entries = Vec::new();
        for entry in element.children_named("Entry") {
            let key_text = entry.required_attribute("Key")?;
            let Ok(key) = key_text.parse::<K>() else {
                log::debug!(
                    "skipping entry with unrecognized key `{key_text}` in `{}`",
                    element.name()
                );
                continue;
            };

            entries.push((key, V::load_from_xml(entry)?));
        }

        Ok(Self {
            entries,
            changes: ChangeLog::default(),
        })
    }

    pub(crate) fn write_to_xml(
        &self,
        writer: &mut EwsXmlWriter,
        element_name: &str,
    ) -> Result<(), Error> {
        if self.entries.is_empty() {
            return Ok(());
        }

        writer.write_element_with(
            XmlNamespace::Types,
            element_name,
            NO_ATTRIBUTES,
            |writer| {
                self.entries.iter().try_for_each(|(key, value)| {
                    writer.write_element_with(
                        XmlNamespace::Types,
                        "Entry",
                        [("Key", key.index())],
                        |writer| value.write_contents(writer),
                    )
                })
            },
        )
    }

    /// Writes field updates for changed and removed entries. With `all` set,
    /// every entry is written as replaced.
    pub(crate) fn write_updates(
        &self,
        definition: &PropertyDefinition,
        writer: &mut EwsXmlWriter,
        target: &UpdateTarget,
        all: bool,
    ) -> Result<(), Error> {
        let update = DictionaryUpdate {
            target,
            field_uri: K::FIELD_URI,
            element_name: definition.xml_element_name(),
        };

        for (key, value) in &self.entries {
            let change = if self.changes.is_added(key) {
                EntryChange::Added
            } else if all || self.changes.is_modified(key) {
                EntryChange::Replaced
            } else if value.is_dirty() {
                EntryChange::Modified
            } else {
                continue;
            };

            value.write_updates(*key, change, &update, writer)?;
        }

        for key in self.changes.removed() {
            V::write_deletes(*key, &update, writer)?;
        }

        Ok(())
    }
}

macro_rules! dictionary_key {
    ($($name:ident => $field_uri:literal),* $(,)?) => {
        $(
            impl DictionaryKey for $name {
                const FIELD_URI: &'static str = $field_uri;

                fn index(&self) -> &'static str {
                    self.as_str()
                }
            }
        )*
    };
}

text_enum! {
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/entry-emailaddress>
    pub enum EmailAddressKey {
        EmailAddress1,
        EmailAddress2,
        EmailAddress3,
    }
}

text_enum! {
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/entry-phonenumber>
    pub enum PhoneNumberKey {
        AssistantPhone,
        BusinessFax,
        BusinessPhone,
        BusinessPhone2,
        Callback,
        CarPhone,
        CompanyMainPhone,
        HomeFax,
        HomePhone,
        HomePhone2,
        Isdn,
        MobilePhone,
        OtherFax,
        OtherTelephone,
        Pager,
        PrimaryPhone,
        RadioPhone,
        Telex,
        TtyTddPhone,
    }
}

text_enum! {
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/entry-imaddress>
    pub enum ImAddressKey {
        ImAddress1,
        ImAddress2,
        ImAddress3,
    }
}

text_enum! {
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/entry-physicaladdress>
    pub enum PhysicalAddressKey {
        Home,
        Business,
        Other,
    }
}

dictionary_key! {
    EmailAddressKey => "contacts:EmailAddress",
    PhoneNumberKey => "contacts:PhoneNumber",
    ImAddressKey => "contacts:ImAddress",
    PhysicalAddressKey => "contacts:PhysicalAddress",
}

text_enum! {
    /// The parts of a physical address, in schema order.
    pub enum PhysicalAddressField {
        Street,
        City,
        State,
        CountryOrRegion,
        PostalCode,
    }
}

impl PhysicalAddressField {
    const ALL: [PhysicalAddressField; 5] = [
        PhysicalAddressField::Street,
        PhysicalAddressField::City,
        PhysicalAddressField::State,
        PhysicalAddressField::CountryOrRegion,
        PhysicalAddressField::PostalCode,
    ];

    /// The field URI addressing this part of an address in updates.
    pub fn field_uri(&self) -> &'static str {
        match self {
            PhysicalAddressField::Street => "contacts:PhysicalAddress:Street",
            PhysicalAddressField::City => "contacts:PhysicalAddress:City",
            PhysicalAddressField::State => "contacts:PhysicalAddress:State",
            PhysicalAddressField::CountryOrRegion => "contacts:PhysicalAddress:CountryOrRegion",
            PhysicalAddressField::PostalCode => "contacts:PhysicalAddress:PostalCode",
        }
    }
}

/// A postal address of a contact.
///
/// Each part of the address is updated on its own, so the entry tracks which
/// parts changed.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/entry-physicaladdress>
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhysicalAddressEntry {
    values: [Option<String>; 5],
    changed: Vec<PhysicalAddressField>,
}

impl PhysicalAddressEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: PhysicalAddressField) -> Option<&str> {
        self.values[field as usize].as_deref()
    }

    /// Sets or clears one part of the address.
    pub fn set(&mut self, field: PhysicalAddressField, value: Option<String>) {
        let slot = &mut self.values[field as usize];
        if *slot == value {
            return;
        }

        *slot = value;
        if !self.changed.contains(&field) {
            self.changed.push(field);
        }
    }

    /// Sets one part of the address, for building entries.
    pub fn with(mut self, field: PhysicalAddressField, value: impl Into<String>) -> Self {
        self.values[field as usize] = Some(value.into());
        self
    }

    fn present_fields(&self) -> impl Iterator<Item = (PhysicalAddressField, &str)> {
        PhysicalAddressField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
    }

    fn write_field_update<K: DictionaryKey>(
        &self,
        key: K,
        field: PhysicalAddressField,
        update: &DictionaryUpdate<'_>,
        writer: &mut EwsXmlWriter,
    ) -> Result<(), Error> {
        let path = PathToElement::IndexedFieldURI {
            field_uri: field.field_uri(),
            field_index: key.index(),
        };

        match self.get(field) {
            Some(value) => update.write_set_entry(writer, &path, key, |writer| {
                writer.write_element_value(XmlNamespace::Types, field.as_str(), value)
            }),
            None => update.target.write_delete_field(writer, &path),
        }
    }
}

impl DictionaryEntry for PhysicalAddressEntry {
    const TRACKS_CHANGES: bool = true;

    fn load_from_xml(element: &XmlElement) -> Result<Self, Error> {
        let mut entry = Self::default();
        for field in PhysicalAddressField::ALL {
            entry.values[field as usize] = element.child_text(field.as_str()).map(str::to_owned);
        }

        Ok(entry)
    }

    fn write_contents(&self, writer: &mut EwsXmlWriter) -> Result<(), Error> {
        self.present_fields().try_for_each(|(field, value)| {
            writer.write_element_value(XmlNamespace::Types, field.as_str(), value)
        })
    }

    fn is_dirty(&self) -> bool {
        !self.changed.is_empty()
    }

    fn clear_change_log(&mut self) {
        self.changed.clear();
    }

    fn write_updates<K: DictionaryKey>(
        &self,
        key: K,
        change: EntryChange,
        update: &DictionaryUpdate<'_>,
        writer: &mut EwsXmlWriter,
    ) -> Result<(), Error> {
        let fields: Vec<PhysicalAddressField> = match change {
            EntryChange::Added => self.present_fields().map(|(field, _)| field).collect(),
            EntryChange::Replaced => PhysicalAddressField::ALL.to_vec(),
            EntryChange::Modified => PhysicalAddressField::ALL
                .into_iter()
                .filter(|field| self.changed.contains(field))
                .collect(),
        };

        fields
            .into_iter()
            .try_for_each(|field| self.write_field_update(key, field, update, writer))
    }

    fn write_deletes<K: DictionaryKey>(
        key: K,
        update: &DictionaryUpdate<'_>,
        writer: &mut EwsXmlWriter,
    ) -> Result<(), Error> {
        PhysicalAddressField::ALL.into_iter().try_for_each(|field| {
            let path = PathToElement::IndexedFieldURI {
                field_uri: field.field_uri(),
                field_index: key.index(),
            };
            update.target.write_delete_field(writer, &path)
        })
    }
}

pub type EmailAddressDictionary = DictionaryProperty<EmailAddressKey, String>;
pub type PhoneNumberDictionary = DictionaryProperty<PhoneNumberKey, String>;
pub type ImAddressDictionary = DictionaryProperty<ImAddressKey, String>;
pub type PhysicalAddressDictionary = DictionaryProperty<PhysicalAddressKey, PhysicalAddressEntry>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        property::{PropertyFlags, PropertyKind},
        test_utils::{assert_written, parse_element, write_to_string},
        types::server_version::ExchangeServerVersion,
    };

    static EMAIL_ADDRESSES: PropertyDefinition = PropertyDefinition::new(
        "EmailAddresses",
        "contacts:EmailAddresses",
        PropertyFlags::CAN_SET.union(PropertyFlags::CAN_UPDATE),
        ExchangeServerVersion::Exchange2007_SP1,
        PropertyKind::EmailAddresses,
    );

    static PHYSICAL_ADDRESSES: PropertyDefinition = PropertyDefinition::new(
        "PhysicalAddresses",
        "contacts:PhysicalAddresses",
        PropertyFlags::CAN_SET.union(PropertyFlags::CAN_UPDATE),
        ExchangeServerVersion::Exchange2007_SP1,
        PropertyKind::PhysicalAddresses,
    );

    const TARGET: UpdateTarget = UpdateTarget::item("Contact");

    fn loaded_addresses() -> EmailAddressDictionary {
        EmailAddressDictionary::load_from_xml(&parse_element(
            r#"<t:EmailAddresses><t:Entry Key="EmailAddress1">a@example.com</t:Entry><t:Entry Key="EmailAddress2">b@example.com</t:Entry><t:Entry Key="EmailAddress9">z@example.com</t:Entry></t:EmailAddresses>"#,
        ))
        .unwrap()
    }

    #[test]
    fn load_skips_unknown_keys() {
        let addresses = loaded_addresses();
        assert_eq!(addresses.len(), 2);
        assert_eq!(
            addresses.get(EmailAddressKey::EmailAddress2).map(String::as_str),
            Some("b@example.com")
        );
        assert!(!addresses.is_dirty());
    }

    #[test]
    fn writes_full_dictionary() {
        let mut phones = PhoneNumberDictionary::new();
        phones.set(PhoneNumberKey::MobilePhone, "+1 555 0100".to_string());
        phones.set(PhoneNumberKey::HomePhone, "+1 555 0199".to_string());

        assert_written(
            |writer| phones.write_to_xml(writer, "PhoneNumbers"),
            concat!(
                "<t:PhoneNumbers>",
                r#"<t:Entry Key="MobilePhone">+1 555 0100</t:Entry>"#,
                r#"<t:Entry Key="HomePhone">+1 555 0199</t:Entry>"#,
                "</t:PhoneNumbers>",
            ),
        );
        assert_written(
            |writer| PhoneNumberDictionary::new().write_to_xml(writer, "PhoneNumbers"),
            "",
        );
    }

    #[test]
    fn updates_only_changed_entries() {
        let mut addresses = loaded_addresses();
        addresses.set(EmailAddressKey::EmailAddress3, "c@example.com".to_string());
        addresses.remove(EmailAddressKey::EmailAddress1);
        assert!(addresses.remove(EmailAddressKey::EmailAddress1).is_none());

        let written = write_to_string(|writer| {
            addresses.write_updates(&EMAIL_ADDRESSES, writer, &TARGET, false)
        });
        assert_eq!(
            written,
            concat!(
                r#"<t:SetItemField><t:IndexedFieldURI FieldURI="contacts:EmailAddress" FieldIndex="EmailAddress3"/>"#,
                r#"<t:Contact><t:EmailAddresses><t:Entry Key="EmailAddress3">c@example.com</t:Entry></t:EmailAddresses></t:Contact></t:SetItemField>"#,
                r#"<t:DeleteItemField><t:IndexedFieldURI FieldURI="contacts:EmailAddress" FieldIndex="EmailAddress1"/></t:DeleteItemField>"#,
            )
        );

        addresses.clear_change_log();
        *addresses.get_mut(EmailAddressKey::EmailAddress2).unwrap() = "bee@example.com".into();
        assert!(addresses.is_dirty());
    }

    #[test]
    fn physical_address_updates_per_field() {
        let mut addresses = PhysicalAddressDictionary::load_from_xml(&parse_element(
            r#"<t:PhysicalAddresses><t:Entry Key="Business"><t:Street>1 Main St</t:Street><t:City>Springfield</t:City></t:Entry></t:PhysicalAddresses>"#,
        ))
        .unwrap();

        let business = addresses.get_mut(PhysicalAddressKey::Business).unwrap();
        assert_eq!(business.get(PhysicalAddressField::City), Some("Springfield"));
        business.set(PhysicalAddressField::City, Some("Shelbyville".into()));
        business.set(PhysicalAddressField::Street, None);
        business.set(PhysicalAddressField::State, None);
        assert!(addresses.is_dirty());

        let written = write_to_string(|writer| {
            addresses.write_updates(&PHYSICAL_ADDRESSES, writer, &TARGET, false)
        });
        assert_eq!(
            written,
            concat!(
                r#"<t:DeleteItemField><t:IndexedFieldURI FieldURI="contacts:PhysicalAddress:Street" FieldIndex="Business"/></t:DeleteItemField>"#,
                r#"<t:SetItemField><t:IndexedFieldURI FieldURI="contacts:PhysicalAddress:City" FieldIndex="Business"/>"#,
                r#"<t:Contact><t:PhysicalAddresses><t:Entry Key="Business"><t:City>Shelbyville</t:City></t:Entry></t:PhysicalAddresses></t:Contact></t:SetItemField>"#,
            )
        );
    }

    #[test]
    fn new_physical_address_writes_present_fields() {
        let mut addresses = PhysicalAddressDictionary::new();
        addresses.set(
            PhysicalAddressKey::Home,
            PhysicalAddressEntry::new().with(PhysicalAddressField::PostalCode, "12345"),
        );

        let written = write_to_string(|writer| {
            addresses.write_updates(&PHYSICAL_ADDRESSES, writer, &TARGET, false)
        });
        assert_eq!(
            written,
            concat!(
                r#"<t:SetItemField><t:IndexedFieldURI FieldURI="contacts:PhysicalAddress:PostalCode" FieldIndex="Home"/>"#,
                r#"<t:Contact><t:PhysicalAddresses><t:Entry Key="Home"><t:PostalCode>12345</t:PostalCode></t:Entry></t:PhysicalAddresses></t:Contact></t:SetItemField>"#,
            )
        );
    }
}
