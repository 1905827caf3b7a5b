/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::collections::{HashMap, HashSet};

use crate::{
    types::server_version::ExchangeServerVersion,
    xml::{EwsXmlWriter, XmlElement},
    Error,
};

use super::{
    PropertyDefinition, PropertyFlags, PropertyKind, PropertyValue, PropertyValueType,
    ServiceObjectSchema, UpdateTarget,
};

type Definition = &'static PropertyDefinition;

/// The property values of one service object, along with a log of the
/// changes made to them since the object was last loaded from the server.
///
/// The change log decides what an update request contains:
///
/// - a property given a value it did not have is *added*;
/// - a property whose existing value was replaced, or mutated through
///   [`get_mut`](Self::get_mut), is *modified*;
/// - a property removed from a saved object is *deleted*.
///
/// Keyed collections (extended properties and the contact dictionaries)
/// additionally keep their own per-entry log, so that an update only touches
/// the entries that changed.
#[derive(Clone, Debug)]
pub struct PropertyBag {
    schema: &'static ServiceObjectSchema,
    properties: HashMap<Definition, PropertyValue>,
    requested: HashSet<Definition>,
    added: HashSet<Definition>,
    modified: HashSet<Definition>,
    deleted: HashSet<Definition>,
}

impl PropertyBag {
    pub fn new(schema: &'static ServiceObjectSchema) -> Self {
        Self {
            schema,
            properties: HashMap::new(),
            requested: HashSet::new(),
            added: HashSet::new(),
            modified: HashSet::new(),
            deleted: HashSet::new(),
        }
    }

    pub fn schema(&self) -> &'static ServiceObjectSchema {
        self.schema
    }

    /// Whether the object has not been saved to the server, i.e. has no
    /// identifier.
    pub fn is_new(&self) -> bool {
        match self.schema.id_property() {
            Some(id) => !self.properties.contains_key(id),
            None => true,
        }
    }

    /// Whether the bag currently holds a value for the property.
    pub fn contains(&self, definition: &PropertyDefinition) -> bool {
        self.properties.contains_key(definition)
    }

    /// Borrows the value of a property.
    ///
    /// Returns `Ok(None)` if the property has no value and its absence is
    /// known: the object is new, the property was requested when the object
    /// was loaded, or it was deleted locally. Otherwise an absent value fails
    /// with [`Error::PropertyNotLoaded`].
    pub fn get<T: PropertyValueType>(&self, definition: Definition) -> Result<Option<&T>, Error> {
        self.check_in_schema(definition)?;

        match self.properties.get(definition) {
            Some(value) => T::from_value(value)
                .map(Some)
                .ok_or(Error::PropertyTypeMismatch(definition.xml_element_name())),
            None => self.check_absence_known(definition).map(|()| None),
        }
    }

    /// Mutably borrows the value of a property.
    ///
    /// The property is recorded as modified, unless its value keeps its own
    /// change log.
    pub fn get_mut<T: PropertyValueType>(
        &mut self,
        definition: Definition,
    ) -> Result<Option<&mut T>, Error> {
        self.check_in_schema(definition)?;

        let tracks_changes = match self.properties.get(definition) {
            Some(value) => {
                if T::from_value(value).is_none() {
                    return Err(Error::PropertyTypeMismatch(definition.xml_element_name()));
                }
                value.tracks_changes()
            }
            None => {
                self.check_absence_known(definition)?;
                return Ok(None);
            }
        };

        self.check_can_change(definition)?;
        if !tracks_changes && !self.added.contains(definition) {
            self.modified.insert(definition);
        }

        Ok(self
            .properties
            .get_mut(definition)
            .and_then(T::from_value_mut))
    }

    /// Mutably borrows the value of a property, first giving it a default
    /// value if it has none.
    pub fn get_or_insert_default<T>(&mut self, definition: Definition) -> Result<&mut T, Error>
    where
        T: PropertyValueType + Default + Into<PropertyValue>,
    {
        if !self.properties.contains_key(definition) {
            // Only keyed collections can be extended without knowing the
            // server's value, as their entries are updated one by one.
            if !definition.kind().is_keyed() {
                self.check_absence_known(definition)?;
            }
            self.set(definition, T::default())?;
        }

        self.get_mut::<T>(definition)?
            .ok_or(Error::PropertyTypeMismatch(definition.xml_element_name()))
    }

    /// Gives a property a new value.
    ///
    /// On a saved object, a loaded keyed collection takes on the new entries
    /// one by one and its missing entries are deleted. A keyed collection
    /// that was never loaded only has the new entries set.
    pub fn set(
        &mut self,
        definition: Definition,
        value: impl Into<PropertyValue>,
    ) -> Result<(), Error> {
        let value = value.into();

        self.check_in_schema(definition)?;
        self.check_can_change(definition)?;
        if !definition.kind().accepts(&value) {
            return Err(Error::PropertyTypeMismatch(definition.xml_element_name()));
        }

        // A keyed collection the server has is replaced entry by entry.
        let per_entry = definition.kind().is_keyed()
            && !self.is_new()
            && !self.added.contains(definition);
        let value = match self.properties.get_mut(definition) {
            Some(existing) if per_entry => match existing.replace_entries(value) {
                None => return Ok(()),
                Some(value) => value,
            },
            _ => value,
        };

        if self.properties.contains_key(definition) {
            if !self.added.contains(definition) {
                self.modified.insert(definition);
            }
        } else if self.deleted.remove(definition) {
            // Deleting and then setting a property is an update.
            self.modified.insert(definition);
        } else {
            self.added.insert(definition);
        }

        self.properties.insert(definition, value);

        Ok(())
    }

    /// Removes the value of a property.
    ///
    /// On a saved object the removal is recorded, so that the next update
    /// deletes the property on the server. Keyed collections instead record
    /// the removal of each of their entries, and fail with
    /// [`Error::PropertyNotLoaded`] if those entries are unknown.
    pub fn delete(&mut self, definition: Definition) -> Result<(), Error> {
        self.check_in_schema(definition)?;

        if self.is_new() {
            self.properties.remove(definition);
            self.added.remove(definition);
            self.modified.remove(definition);
            return Ok(());
        }

        if !definition.has_flag(PropertyFlags::CAN_DELETE) {
            return Err(Error::PropertyNotDeletable(definition.xml_element_name()));
        }

        if definition.kind().is_keyed() {
            if self.added.remove(definition) {
                self.properties.remove(definition);
            } else if let Some(value) = self.properties.get_mut(definition) {
                value.remove_all_entries();
            } else {
                self.check_absence_known(definition)?;
            }

            return Ok(());
        }

        if self.deleted.contains(definition) {
            return Ok(());
        }

        self.properties.remove(definition);
        self.modified.remove(definition);
        let was_added = self.added.remove(definition);

        // A value added to a property the server was known not to have
        // never reached the server, so there is nothing to delete there.
        if !(was_added && self.requested.contains(definition)) {
            self.deleted.insert(definition);
        }

        Ok(())
    }

    /// Forgets all recorded changes, treating the current values as the
    /// server's.
    pub fn clear_change_log(&mut self) {
        self.added.clear();
        self.modified.clear();
        self.deleted.clear();

        for value in self.properties.values_mut() {
            value.clear_change_log();
        }
    }

    /// Whether anything changed since the object was loaded.
    pub fn is_dirty(&self) -> bool {
        !self.added.is_empty()
            || !self.modified.is_empty()
            || !self.deleted.is_empty()
            || self.properties.values().any(PropertyValue::is_dirty)
    }

    /// Whether an update request for this object would contain any change.
    pub fn is_update_call_necessary(&self) -> bool {
        self.schema.definitions().into_iter().any(|definition| {
            self.deleted.contains(definition)
                || self.properties.get(definition).is_some_and(|value| {
                    self.added.contains(definition)
                        || self.modified.contains(definition)
                        || value.is_dirty()
                })
        })
    }

    /// The properties changed since the last load, in schema order.
    pub fn changed_properties(&self) -> Vec<Definition> {
        self.schema
            .definitions()
            .into_iter()
            .filter(|definition| {
                self.added.contains(definition)
                    || self.modified.contains(definition)
                    || self
                        .properties
                        .get(definition)
                        .is_some_and(PropertyValue::is_dirty)
            })
            .collect()
    }

    /// The properties deleted since the last load, in schema order.
    pub fn deleted_properties(&self) -> Vec<Definition> {
        self.schema
            .definitions()
            .into_iter()
            .filter(|definition| self.deleted.contains(definition))
            .collect()
    }

    /// Records properties as requested from the server, so that their
    /// absence reads as "no value".
    pub(crate) fn mark_requested<I>(&mut self, definitions: I)
    where
        I: IntoIterator<Item = Definition>,
    {
        self.requested.extend(definitions);
    }

    /// Loads property values from the children of an item or folder element.
    ///
    /// When `clear` is set, values from a previous load are dropped first.
    pub(crate) fn load_from_xml(&mut self, element: &XmlElement, clear: bool) -> Result<(), Error> {
        if clear {
            self.properties.clear();
            self.requested.clear();
        }

        let mut extended_seen = false;
        for child in element.children() {
            let Some(definition) = self.schema.find(child.name()) else {
                log::debug!(
                    "skipping unknown element `{}` in `{}`",
                    child.name(),
                    element.name()
                );
                continue;
            };

            match definition.kind().read(child)? {
                PropertyValue::ExtendedProperties(loaded) if extended_seen => {
                    if let Some(PropertyValue::ExtendedProperties(existing)) =
                        self.properties.get_mut(definition)
                    {
                        existing.extend_loaded(loaded);
                    }
                }
                value => {
                    self.properties.insert(definition, value);
                }
            }

            extended_seen |= definition.kind() == PropertyKind::ExtendedProperties;
            self.requested.insert(definition);
        }

        self.clear_change_log();

        Ok(())
    }

    /// Takes on every value of `other`, typically the server's copy of this
    /// object returned by a create or update, and clears the change log.
    pub(crate) fn merge_from(&mut self, other: &PropertyBag) {
        for (definition, value) in &other.properties {
            self.properties.insert(*definition, value.clone());
        }
        self.requested.extend(other.requested.iter().copied());

        self.clear_change_log();
    }

    /// Writes every settable value, as used when creating an object.
    pub(crate) fn write_to_xml(
        &self,
        writer: &mut EwsXmlWriter,
        version: ExchangeServerVersion,
    ) -> Result<(), Error> {
        for definition in self.schema.definitions() {
            let Some(value) = self.properties.get(definition) else {
                continue;
            };

            if !definition.has_flag(PropertyFlags::CAN_SET) {
                continue;
            }

            definition.check_version(version)?;
            value.write_to_xml(writer, definition.xml_element_name())?;
        }

        Ok(())
    }

    /// Writes the field updates needed to bring the server's copy of the
    /// object in line with this one.
    pub(crate) fn write_to_xml_for_update(
        &self,
        writer: &mut EwsXmlWriter,
        version: ExchangeServerVersion,
        target: &UpdateTarget,
    ) -> Result<(), Error> {
        for definition in self.schema.definitions() {
            if self.deleted.contains(definition) {
                if !definition.has_flag(PropertyFlags::CAN_DELETE) {
                    return Err(Error::PropertyNotDeletable(definition.xml_element_name()));
                }

                definition.check_version(version)?;
                target.write_delete_field(writer, &definition.path())?;
                continue;
            }

            let Some(value) = self.properties.get(definition) else {
                continue;
            };

            let replaced = self.added.contains(definition) || self.modified.contains(definition);
            if !replaced && !value.is_dirty() {
                continue;
            }

            if !definition.has_flag(PropertyFlags::CAN_UPDATE) {
                return Err(Error::PropertyNotUpdatable(definition.xml_element_name()));
            }

            definition.check_version(version)?;
            value.write_updates(definition, writer, target, version, replaced)?;
        }

        Ok(())
    }

    fn check_in_schema(&self, definition: &PropertyDefinition) -> Result<(), Error> {
        if self.schema.contains(definition) {
            Ok(())
        } else {
            Err(Error::PropertyNotInSchema {
                property: definition.xml_element_name(),
                schema: self.schema.name(),
            })
        }
    }

    fn check_can_change(&self, definition: &PropertyDefinition) -> Result<(), Error> {
        if self.is_new() {
            if !definition.has_flag(PropertyFlags::CAN_SET) {
                return Err(Error::ReadOnlyProperty(definition.xml_element_name()));
            }
        } else if !definition.has_flag(PropertyFlags::CAN_UPDATE) {
            return Err(Error::PropertyNotUpdatable(definition.xml_element_name()));
        }

        Ok(())
    }

    fn check_absence_known(&self, definition: &PropertyDefinition) -> Result<(), Error> {
        if self.is_new() || self.requested.contains(definition) || self.deleted.contains(definition)
        {
            Ok(())
        } else {
            Err(Error::PropertyNotLoaded(definition.xml_element_name()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        complex::{Recipients, StringList},
        property::PropertyKind,
        test_utils::{assert_written, parse_element},
        types::{server_version::ExchangeServerVersion, Importance, ItemId},
    };

    const V2007: ExchangeServerVersion = ExchangeServerVersion::Exchange2007_SP1;

    static ID: PropertyDefinition = PropertyDefinition::new(
        "ItemId",
        "item:ItemId",
        PropertyFlags::READ_ONLY,
        V2007,
        PropertyKind::ItemId,
    );
    static SUBJECT: PropertyDefinition = PropertyDefinition::new(
        "Subject",
        "item:Subject",
        PropertyFlags::READ_WRITE,
        V2007,
        PropertyKind::String,
    );
    static IMPORTANCE: PropertyDefinition = PropertyDefinition::new(
        "Importance",
        "item:Importance",
        PropertyFlags::READ_WRITE,
        V2007,
        PropertyKind::Enum(Importance::VALUES),
    );
    static CATEGORIES: PropertyDefinition = PropertyDefinition::new(
        "Categories",
        "item:Categories",
        PropertyFlags::READ_WRITE,
        V2007,
        PropertyKind::StringList,
    );
    static SIZE: PropertyDefinition = PropertyDefinition::new(
        "Size",
        "item:Size",
        PropertyFlags::READ_ONLY,
        V2007,
        PropertyKind::Integer,
    );
    static TO: PropertyDefinition = PropertyDefinition::new(
        "ToRecipients",
        "message:ToRecipients",
        PropertyFlags::READ_WRITE,
        V2007,
        PropertyKind::Recipients,
    );
    static PREVIEW: PropertyDefinition = PropertyDefinition::new(
        "Preview",
        "item:Preview",
        PropertyFlags::SET_UPDATE,
        ExchangeServerVersion::Exchange2013,
        PropertyKind::String,
    );
    static UNRELATED: PropertyDefinition = PropertyDefinition::new(
        "DisplayName",
        "folder:DisplayName",
        PropertyFlags::READ_WRITE,
        V2007,
        PropertyKind::String,
    );

    static SCHEMA: ServiceObjectSchema = ServiceObjectSchema::new(
        "Item",
        None,
        &[&ID, &SUBJECT, &SIZE, &CATEGORIES, &IMPORTANCE, &TO, &PREVIEW],
        Some(&ID),
    );

    const TARGET: UpdateTarget = UpdateTarget::item("Message");

    fn saved_bag() -> PropertyBag {
        let mut bag = PropertyBag::new(&SCHEMA);
        let element = parse_element(
            r#"<t:Message><t:ItemId Id="AAMk" ChangeKey="CQAA"/><t:Subject>Lunch</t:Subject><t:Size>512</t:Size><t:Categories><t:String>Food</t:String></t:Categories><t:Unknown>ignored</t:Unknown></t:Message>"#,
        );
        bag.load_from_xml(&element, true).unwrap();
        bag
    }

    fn write_update(bag: &PropertyBag) -> String {
        crate::test_utils::write_to_string(|writer| {
            bag.write_to_xml_for_update(writer, ExchangeServerVersion::Exchange2013_SP1, &TARGET)
        })
    }

    #[test]
    fn new_bag_tracks_additions() {
        let mut bag = PropertyBag::new(&SCHEMA);
        assert!(bag.is_new());
        assert_eq!(bag.get::<String>(&SUBJECT).unwrap(), None);

        bag.set(&SUBJECT, "Lunch").unwrap();
        bag.set(&SUBJECT, "Dinner").unwrap();
        assert_eq!(
            bag.get::<String>(&SUBJECT).unwrap().map(String::as_str),
            Some("Dinner")
        );
        assert_eq!(bag.changed_properties(), vec![&SUBJECT]);
        assert!(bag.is_dirty());

        bag.delete(&SUBJECT).unwrap();
        assert!(!bag.is_dirty());
        assert!(bag.deleted_properties().is_empty());
    }

    #[test]
    fn read_only_and_foreign_properties_are_refused() {
        let mut bag = PropertyBag::new(&SCHEMA);

        assert!(matches!(
            bag.set(&SIZE, 10),
            Err(Error::ReadOnlyProperty("Size"))
        ));
        assert!(matches!(
            bag.set(&UNRELATED, "Inbox"),
            Err(Error::PropertyNotInSchema {
                property: "DisplayName",
                schema: "Item"
            })
        ));
        assert!(matches!(
            bag.set(&SUBJECT, true),
            Err(Error::PropertyTypeMismatch("Subject"))
        ));
        assert!(matches!(
            bag.set(&IMPORTANCE, "Urgent"),
            Err(Error::PropertyTypeMismatch("Importance"))
        ));
        bag.set(&IMPORTANCE, Importance::High.as_str()).unwrap();
    }

    #[test]
    fn load_clears_change_log_and_records_requested() {
        let bag = saved_bag();

        assert!(!bag.is_new());
        assert!(!bag.is_dirty());
        assert_eq!(
            bag.get::<ItemId>(&ID).unwrap(),
            Some(&ItemId::new("AAMk", Some("CQAA".into())))
        );
        assert_eq!(bag.get::<i64>(&SIZE).unwrap(), Some(&512));
        assert!(matches!(
            bag.get::<String>(&IMPORTANCE),
            Err(Error::PropertyNotLoaded("Importance"))
        ));
        assert!(matches!(
            bag.get::<bool>(&SUBJECT),
            Err(Error::PropertyTypeMismatch("Subject"))
        ));
    }

    #[test]
    fn saved_bag_tracks_modifications_and_deletions() {
        let mut bag = saved_bag();

        assert!(matches!(
            bag.set(&SIZE, 10),
            Err(Error::PropertyNotUpdatable("Size"))
        ));
        assert!(matches!(
            bag.delete(&SIZE),
            Err(Error::PropertyNotDeletable("Size"))
        ));

        bag.set(&SUBJECT, "Dinner").unwrap();
        bag.delete(&CATEGORIES).unwrap();
        bag.delete(&CATEGORIES).unwrap();
        bag.set(&IMPORTANCE, "High").unwrap();

        assert_eq!(bag.changed_properties(), vec![&SUBJECT, &IMPORTANCE]);
        assert_eq!(bag.deleted_properties(), vec![&CATEGORIES]);
        assert_eq!(bag.get::<StringList>(&CATEGORIES).unwrap(), None);
        assert!(bag.is_update_call_necessary());

        assert_eq!(
            write_update(&bag),
            concat!(
                r#"<t:SetItemField><t:FieldURI FieldURI="item:Subject"/><t:Message><t:Subject>Dinner</t:Subject></t:Message></t:SetItemField>"#,
                r#"<t:DeleteItemField><t:FieldURI FieldURI="item:Categories"/></t:DeleteItemField>"#,
                r#"<t:SetItemField><t:FieldURI FieldURI="item:Importance"/><t:Message><t:Importance>High</t:Importance></t:Message></t:SetItemField>"#,
            )
        );

        bag.clear_change_log();
        assert!(!bag.is_update_call_necessary());
        assert_eq!(write_update(&bag), "");
    }

    #[test]
    fn setting_a_deleted_property_becomes_an_update() {
        let mut bag = saved_bag();

        bag.delete(&SUBJECT).unwrap();
        bag.set(&SUBJECT, "Brunch").unwrap();

        assert!(bag.deleted_properties().is_empty());
        assert_eq!(
            write_update(&bag),
            r#"<t:SetItemField><t:FieldURI FieldURI="item:Subject"/><t:Message><t:Subject>Brunch</t:Subject></t:Message></t:SetItemField>"#
        );
    }

    #[test]
    fn deleting_a_property_added_to_a_known_absence_is_a_no_op() {
        let mut bag = saved_bag();
        bag.mark_requested([&IMPORTANCE as Definition]);
        assert_eq!(bag.get::<String>(&IMPORTANCE).unwrap(), None);

        bag.set(&IMPORTANCE, "Low").unwrap();
        bag.delete(&IMPORTANCE).unwrap();

        assert!(!bag.is_dirty());
    }

    #[test]
    fn mutable_access_marks_plain_values_modified() {
        let mut bag = saved_bag();

        bag.get_mut::<String>(&SUBJECT)
            .unwrap()
            .unwrap()
            .push_str(" at noon");
        assert_eq!(bag.changed_properties(), vec![&SUBJECT]);

        // Lists keep their own change log; borrowing alone is not a change.
        bag.get_mut::<StringList>(&CATEGORIES).unwrap();
        assert_eq!(bag.changed_properties(), vec![&SUBJECT]);

        bag.get_mut::<StringList>(&CATEGORIES)
            .unwrap()
            .unwrap()
            .push("Work");
        assert_eq!(bag.changed_properties(), vec![&SUBJECT, &CATEGORIES]);
        assert_eq!(
            write_update(&bag),
            concat!(
                r#"<t:SetItemField><t:FieldURI FieldURI="item:Subject"/><t:Message><t:Subject>Lunch at noon</t:Subject></t:Message></t:SetItemField>"#,
                r#"<t:SetItemField><t:FieldURI FieldURI="item:Categories"/><t:Message><t:Categories><t:String>Food</t:String><t:String>Work</t:String></t:Categories></t:Message></t:SetItemField>"#,
            )
        );
    }

    #[test]
    fn unloaded_list_is_not_created_on_saved_bag() {
        let mut bag = saved_bag();

        assert!(matches!(
            bag.get_or_insert_default::<Recipients>(&TO),
            Err(Error::PropertyNotLoaded("ToRecipients"))
        ));
        assert!(!bag.is_dirty());

        bag.mark_requested([&TO as Definition]);
        bag.get_or_insert_default::<Recipients>(&TO)
            .unwrap()
            .push(crate::complex::Mailbox::new("bob@example.com"));
        assert_eq!(bag.changed_properties(), vec![&TO]);
    }

    #[test]
    fn emptied_list_is_deleted() {
        let mut bag = saved_bag();
        bag.get_mut::<StringList>(&CATEGORIES)
            .unwrap()
            .unwrap()
            .clear();

        assert_eq!(
            write_update(&bag),
            r#"<t:DeleteItemField><t:FieldURI FieldURI="item:Categories"/></t:DeleteItemField>"#
        );
    }

    #[test]
    fn full_write_follows_schema_order_and_skips_read_only() {
        let mut bag = PropertyBag::new(&SCHEMA);
        bag.set(&IMPORTANCE, "Low").unwrap();
        bag.set(&SUBJECT, "Lunch").unwrap();
        bag.get_or_insert_default::<Recipients>(&TO)
            .unwrap()
            .push(crate::complex::Mailbox::new("bob@example.com"));

        assert_written(
            |writer| bag.write_to_xml(writer, V2007),
            concat!(
                "<t:Subject>Lunch</t:Subject>",
                "<t:Importance>Low</t:Importance>",
                "<t:ToRecipients><t:Mailbox><t:EmailAddress>bob@example.com</t:EmailAddress></t:Mailbox></t:ToRecipients>",
            ),
        );
    }

    #[test]
    fn writes_are_version_gated() {
        let mut bag = PropertyBag::new(&SCHEMA);
        bag.set(&PREVIEW, "Hello").unwrap();

        let mut writer = EwsXmlWriter::new();
        assert!(matches!(
            bag.write_to_xml(&mut writer, ExchangeServerVersion::Exchange2010_SP2),
            Err(Error::PropertyVersion {
                property: "Preview",
                ..
            })
        ));
    }

    #[test]
    fn merge_takes_server_values() {
        let mut bag = PropertyBag::new(&SCHEMA);
        bag.set(&SUBJECT, "Lunch").unwrap();

        let mut returned = PropertyBag::new(&SCHEMA);
        returned
            .load_from_xml(
                &parse_element(r#"<t:Message><t:ItemId Id="NEW" ChangeKey="CK1"/></t:Message>"#),
                true,
            )
            .unwrap();

        bag.merge_from(&returned);
        assert!(!bag.is_new());
        assert!(!bag.is_dirty());
        assert_eq!(
            bag.get::<String>(&SUBJECT).unwrap().map(String::as_str),
            Some("Lunch")
        );
    }
}
