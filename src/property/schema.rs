/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use super::{PropertyDefinition, PropertyFlags, PropertyKind};

/// The ordered set of properties one kind of service object has.
///
/// The order of definitions is the order EWS requires the elements to appear
/// in, parent schema first.
#[derive(Debug)]
pub struct ServiceObjectSchema {
    name: &'static str,
    parent: Option<&'static ServiceObjectSchema>,
    definitions: &'static [&'static PropertyDefinition],
    id_property: Option<&'static PropertyDefinition>,
}

impl ServiceObjectSchema {
    pub const fn new(
        name: &'static str,
        parent: Option<&'static ServiceObjectSchema>,
        definitions: &'static [&'static PropertyDefinition],
        id_property: Option<&'static PropertyDefinition>,
    ) -> Self {
        Self {
            name,
            parent,
            definitions,
            id_property,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent(&self) -> Option<&'static ServiceObjectSchema> {
        self.parent
    }

    /// The property holding the server-assigned identifier of the object.
    pub fn id_property(&self) -> Option<&'static PropertyDefinition> {
        match self.id_property {
            Some(definition) => Some(definition),
            None => self.parent.and_then(ServiceObjectSchema::id_property),
        }
    }

    /// Every definition in the schema, in XML sequence order.
    pub fn definitions(&self) -> Vec<&'static PropertyDefinition> {
        let mut definitions = self
            .parent
            .map(ServiceObjectSchema::definitions)
            .unwrap_or_default();
        definitions.extend_from_slice(self.definitions);

        definitions
    }

    pub fn contains(&self, definition: &PropertyDefinition) -> bool {
        self.definitions.iter().any(|known| *known == definition)
            || self
                .parent
                .is_some_and(|parent| parent.contains(definition))
    }

    /// Finds the definition read from elements with the given local name.
    pub fn find(&self, xml_element_name: &str) -> Option<&'static PropertyDefinition> {
        self.parent
            .and_then(|parent| parent.find(xml_element_name))
            .or_else(|| {
                self.definitions
                    .iter()
                    .copied()
                    .find(|definition| definition.xml_element_name() == xml_element_name)
            })
    }

    /// The properties returned when all properties are requested.
    pub fn first_class_properties(&self) -> Vec<&'static PropertyDefinition> {
        self.definitions()
            .into_iter()
            .filter(|definition| !definition.has_flag(PropertyFlags::MUST_BE_EXPLICITLY_LOADED))
            .collect()
    }

    /// The definition holding extended properties, if the schema has one.
    pub fn extended_properties(&self) -> Option<&'static PropertyDefinition> {
        self.definitions()
            .into_iter()
            .find(|definition| definition.kind() == PropertyKind::ExtendedProperties)
    }
}
