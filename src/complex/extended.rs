/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt;

use crate::{
    property::UpdateTarget,
    types::{DistinguishedPropertySet, MapiPropertyType, PathToElement},
    xml::{EwsXmlWriter, XmlElement, XmlNamespace, NO_ATTRIBUTES},
    Error,
};

use super::ChangeLog;

/// Identifies a MAPI property not exposed as a first-class EWS property.
///
/// A property is addressed either by its tag, or by a name or numeric id
/// within a property set. The set is given either as a well-known set or as
/// a GUID.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/extendedfielduri>
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtendedPropertyDefinition {
    pub distinguished_property_set_id: Option<DistinguishedPropertySet>,
    pub property_set_id: Option<String>,
    pub property_tag: Option<u16>,
    pub property_name: Option<String>,
    pub property_id: Option<i32>,
    pub property_type: MapiPropertyType,
}

impl ExtendedPropertyDefinition {
    fn empty(property_type: MapiPropertyType) -> Self {
        Self {
            distinguished_property_set_id: None,
            property_set_id: None,
            property_tag: None,
            property_name: None,
            property_id: None,
            property_type,
        }
    }

    /// A property addressed by its MAPI tag, e.g. `0x1000` for `PR_BODY`.
    pub fn tagged(property_tag: u16, property_type: MapiPropertyType) -> Self {
        Self {
            property_tag: Some(property_tag),
            ..Self::empty(property_type)
        }
    }

    /// A named property in a well-known property set.
    pub fn named(
        property_set: DistinguishedPropertySet,
        property_name: impl Into<String>,
        property_type: MapiPropertyType,
    ) -> Self {
        Self {
            distinguished_property_set_id: Some(property_set),
            property_name: Some(property_name.into()),
            ..Self::empty(property_type)
        }
    }

    /// A named property in the property set with the given GUID.
    pub fn named_in_set(
        property_set_id: impl Into<String>,
        property_name: impl Into<String>,
        property_type: MapiPropertyType,
    ) -> Self {
        Self {
            property_set_id: Some(property_set_id.into()),
            property_name: Some(property_name.into()),
            ..Self::empty(property_type)
        }
    }

    /// A property with a numeric id in a well-known property set.
    pub fn with_id(
        property_set: DistinguishedPropertySet,
        property_id: i32,
        property_type: MapiPropertyType,
    ) -> Self {
        Self {
            distinguished_property_set_id: Some(property_set),
            property_id: Some(property_id),
            ..Self::empty(property_type)
        }
    }

    /// A property with a numeric id in the property set with the given GUID.
    pub fn with_id_in_set(
        property_set_id: impl Into<String>,
        property_id: i32,
        property_type: MapiPropertyType,
    ) -> Self {
        Self {
            property_set_id: Some(property_set_id.into()),
            property_id: Some(property_id),
            ..Self::empty(property_type)
        }
    }

    pub fn path(&self) -> PathToElement {
        PathToElement::ExtendedFieldURI(self.clone())
    }

    pub(crate) fn from_element(element: &XmlElement) -> Result<Self, Error> {
        let property_tag = element
            .attribute("PropertyTag")
            .map(parse_property_tag)
            .transpose()?;
        let property_id = element
            .attribute("PropertyId")
            .map(|id| {
                id.trim().parse().map_err(|_| Error::InvalidValue {
                    kind: "PropertyId",
                    value: id.to_owned(),
                })
            })
            .transpose()?;

        Ok(Self {
            distinguished_property_set_id: element
                .attribute("DistinguishedPropertySetId")
                .map(str::parse)
                .transpose()?,
            property_set_id: element.attribute("PropertySetId").map(str::to_owned),
            property_tag,
            property_name: element.attribute("PropertyName").map(str::to_owned),
            property_id,
            property_type: element.required_attribute("PropertyType")?.parse()?,
        })
    }

    pub(crate) fn write(&self, writer: &mut EwsXmlWriter) -> Result<(), Error> {
        let property_tag = self.property_tag.map(|tag| format!("0x{tag:x}"));
        let property_id = self.property_id.map(|id| id.to_string());

        let attributes = [
            (
                "DistinguishedPropertySetId",
                self.distinguished_property_set_id
                    .as_ref()
                    .map(DistinguishedPropertySet::as_str),
            ),
            ("PropertySetId", self.property_set_id.as_deref()),
            ("PropertyTag", property_tag.as_deref()),
            ("PropertyName", self.property_name.as_deref()),
            ("PropertyId", property_id.as_deref()),
            ("PropertyType", Some(self.property_type.as_str())),
        ];

        writer.write_empty_element(
            XmlNamespace::Types,
            "ExtendedFieldURI",
            attributes
                .into_iter()
                .filter_map(|(name, value)| value.map(|value| (name, value))),
        )
    }
}

fn parse_property_tag(value: &str) -> Result<u16, Error> {
    let trimmed = value.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => trimmed.parse(),
    };

    parsed.map_err(|_| Error::InvalidValue {
        kind: "PropertyTag",
        value: value.to_owned(),
    })
}

impl fmt::Display for ExtendedPropertyDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(set) = &self.distinguished_property_set_id {
            write!(f, "{set}:")?;
        } else if let Some(set) = &self.property_set_id {
            write!(f, "{{{set}}}:")?;
        }

        if let Some(tag) = self.property_tag {
            write!(f, "0x{tag:04x}")?;
        } else if let Some(name) = &self.property_name {
            write!(f, "{name}")?;
        } else if let Some(id) = self.property_id {
            write!(f, "{id}")?;
        }

        write!(f, " ({})", self.property_type)
    }
}

/// The value of an extended property, single or multi-valued depending on
/// its MAPI type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtendedPropertyValue {
    Single(String),
    Multiple(Vec<String>),
}

impl From<&str> for ExtendedPropertyValue {
    fn from(value: &str) -> Self {
        ExtendedPropertyValue::Single(value.to_owned())
    }
}

impl From<String> for ExtendedPropertyValue {
    fn from(value: String) -> Self {
        ExtendedPropertyValue::Single(value)
    }
}

impl From<Vec<String>> for ExtendedPropertyValue {
    fn from(value: Vec<String>) -> Self {
        ExtendedPropertyValue::Multiple(value)
    }
}

/// An extended property along with its value.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/extendedproperty>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedProperty {
    pub definition: ExtendedPropertyDefinition,
    pub value: ExtendedPropertyValue,
}

impl ExtendedProperty {
    pub(crate) fn load_from_xml(element: &XmlElement) -> Result<Self, Error> {
        let definition =
            ExtendedPropertyDefinition::from_element(element.required_child("ExtendedFieldURI")?)?;

        let value = if let Some(value) = element.child("Value") {
            ExtendedPropertyValue::Single(value.text().to_owned())
        } else if let Some(values) = element.child("Values") {
            ExtendedPropertyValue::Multiple(
                values
                    .children_named("Value")
                    .map(|value| value.text().to_owned())
                    .collect(),
            )
        } else {
            return Err(Error::UnexpectedResponse(format!(
                "extended property {definition} has no value"
            )));
        };

        Ok(Self { definition, value })
    }

    pub(crate) fn write_to_xml(&self, writer: &mut EwsXmlWriter) -> Result<(), Error> {
        let ns = XmlNamespace::Types;
        writer.write_element_with(ns, "ExtendedProperty", NO_ATTRIBUTES, |writer| {
            self.definition.write(writer)?;

            match &self.value {
                ExtendedPropertyValue::Single(value) => {
                    writer.write_element_value(ns, "Value", value)
                }
                ExtendedPropertyValue::Multiple(values) => {
                    writer.write_element_with(ns, "Values", NO_ATTRIBUTES, |writer| {
                        values
                            .iter()
                            .try_for_each(|value| writer.write_element_value(ns, "Value", value))
                    })
                }
            }
        })
    }
}

/// The extended properties of an object, keyed by definition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtendedPropertyCollection {
    properties: Vec<ExtendedProperty>,
    changes: ChangeLog<ExtendedPropertyDefinition>,
}

impl ExtendedPropertyCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_loaded(properties: Vec<ExtendedProperty>) -> Self {
        Self {
            properties,
            changes: ChangeLog::default(),
        }
    }

    /// Appends properties read from further `ExtendedProperty` elements of
    /// the same object.
    pub(crate) fn extend_loaded(&mut self, other: ExtendedPropertyCollection) {
        self.properties.extend(other.properties);
    }

    pub fn get(&self, definition: &ExtendedPropertyDefinition) -> Option<&ExtendedPropertyValue> {
        self.properties
            .iter()
            .find(|property| &property.definition == definition)
            .map(|property| &property.value)
    }

    pub fn set(
        &mut self,
        definition: ExtendedPropertyDefinition,
        value: impl Into<ExtendedPropertyValue>,
    ) {
        let value = value.into();

        match self
            .properties
            .iter_mut()
            .find(|property| property.definition == definition)
        {
            Some(existing) => {
                self.changes.record_set(&definition, true);
                existing.value = value;
            }
            None => {
                self.changes.record_set(&definition, false);
                self.properties.push(ExtendedProperty { definition, value });
            }
        }
    }

    /// Removes a property, returning whether it was present.
    pub fn remove(&mut self, definition: &ExtendedPropertyDefinition) -> bool {
        let Some(position) = self
            .properties
            .iter()
            .position(|property| &property.definition == definition)
        else {
            return false;
        };

        self.properties.remove(position);
        self.changes.record_remove(definition);
        true
    }

    /// Takes on the properties of `other`, recording the removal of every
    /// property `other` lacks.
    pub(crate) fn replace_with(&mut self, other: ExtendedPropertyCollection) {
        self.remove_all_except(&other);
        for property in other.properties {
            self.set(property.definition, property.value);
        }
    }

    /// Removes every property, recording each removal.
    pub(crate) fn remove_all(&mut self) {
        self.remove_all_except(&ExtendedPropertyCollection::default());
    }

    fn remove_all_except(&mut self, kept: &ExtendedPropertyCollection) {
        let removed: Vec<_> = self
            .properties
            .iter()
            .map(|property| property.definition.clone())
            .filter(|definition| kept.get(definition).is_none())
            .collect();

        for definition in &removed {
            self.remove(definition);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtendedProperty> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn clear_change_log(&mut self) {
        self.changes.clear();
    }

    pub(crate) fn write_to_xml(&self, writer: &mut EwsXmlWriter) -> Result<(), Error> {
        self.properties
            .iter()
            .try_for_each(|property| property.write_to_xml(writer))
    }

    /// Writes one field update per changed property. With `all` set, every
    /// property is written, as when the whole collection was assigned.
    pub(crate) fn write_updates(
        &self,
        writer: &mut EwsXmlWriter,
        target: &UpdateTarget,
        all: bool,
    ) -> Result<(), Error> {
        for property in &self.properties {
            let changed = self.changes.is_added(&property.definition)
                || self.changes.is_modified(&property.definition);
            if !all && !changed {
                continue;
            }

            target.write_set_field(writer, &property.definition.path(), |writer| {
                property.write_to_xml(writer)
            })?;
        }

        for definition in self.changes.removed() {
            target.write_delete_field(writer, &definition.path())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_written, parse_element, write_to_string};

    fn flag_request() -> ExtendedPropertyDefinition {
        ExtendedPropertyDefinition::tagged(0x1090, MapiPropertyType::Integer)
    }

    #[test]
    fn writes_definition_attributes_in_schema_order() {
        let definition = ExtendedPropertyDefinition::named(
            DistinguishedPropertySet::PublicStrings,
            "Keywords",
            MapiPropertyType::StringArray,
        );
        assert_written(
            |writer| definition.write(writer),
            r#"<t:ExtendedFieldURI DistinguishedPropertySetId="PublicStrings" PropertyName="Keywords" PropertyType="StringArray"/>"#,
        );

        let definition = ExtendedPropertyDefinition::with_id_in_set(
            "00062008-0000-0000-C000-000000000046",
            0x8503,
            MapiPropertyType::Boolean,
        );
        assert_written(
            |writer| definition.write(writer),
            r#"<t:ExtendedFieldURI PropertySetId="00062008-0000-0000-C000-000000000046" PropertyId="34051" PropertyType="Boolean"/>"#,
        );

        assert_written(
            |writer| flag_request().write(writer),
            r#"<t:ExtendedFieldURI PropertyTag="0x1090" PropertyType="Integer"/>"#,
        );
    }

    #[test]
    fn reads_single_and_multiple_values() {
        let single = ExtendedProperty::load_from_xml(&parse_element(
            r#"<t:ExtendedProperty><t:ExtendedFieldURI PropertyTag="0x1090" PropertyType="Integer"/><t:Value>2</t:Value></t:ExtendedProperty>"#,
        ))
        .unwrap();
        assert_eq!(single.definition, flag_request());
        assert_eq!(single.value, ExtendedPropertyValue::Single("2".into()));

        let multiple = ExtendedProperty::load_from_xml(&parse_element(
            r#"<t:ExtendedProperty><t:ExtendedFieldURI DistinguishedPropertySetId="PublicStrings" PropertyName="Keywords" PropertyType="StringArray"/><t:Values><t:Value>a</t:Value><t:Value>b</t:Value></t:Values></t:ExtendedProperty>"#,
        ))
        .unwrap();
        assert_eq!(
            multiple.value,
            ExtendedPropertyValue::Multiple(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            multiple.definition.to_string(),
            "PublicStrings:Keywords (StringArray)"
        );
    }

    #[test]
    fn property_without_value_is_rejected() {
        assert!(ExtendedProperty::load_from_xml(&parse_element(
            r#"<t:ExtendedProperty><t:ExtendedFieldURI PropertyTag="0x1090" PropertyType="Integer"/></t:ExtendedProperty>"#,
        ))
        .is_err());
    }

    #[test]
    fn updates_touch_only_changed_properties() {
        let keep = ExtendedPropertyDefinition::tagged(0x0e07, MapiPropertyType::Integer);
        let removed = ExtendedPropertyDefinition::tagged(0x0e17, MapiPropertyType::Integer);
        let mut collection = ExtendedPropertyCollection::from_loaded(vec![
            ExtendedProperty {
                definition: keep.clone(),
                value: "1".into(),
            },
            ExtendedProperty {
                definition: removed.clone(),
                value: "4".into(),
            },
        ]);
        assert!(!collection.is_dirty());

        collection.set(flag_request(), "2");
        assert!(collection.remove(&removed));
        assert!(!collection.remove(&removed));
        assert!(collection.is_dirty());
        assert_eq!(
            collection.get(&keep),
            Some(&ExtendedPropertyValue::Single("1".into()))
        );

        let target = UpdateTarget::item("Message");
        let written = write_to_string(|writer| collection.write_updates(writer, &target, false));
        assert_eq!(
            written,
            concat!(
                r#"<t:SetItemField><t:ExtendedFieldURI PropertyTag="0x1090" PropertyType="Integer"/><t:Message><t:ExtendedProperty><t:ExtendedFieldURI PropertyTag="0x1090" PropertyType="Integer"/><t:Value>2</t:Value></t:ExtendedProperty></t:Message></t:SetItemField>"#,
                r#"<t:DeleteItemField><t:ExtendedFieldURI PropertyTag="0xe17" PropertyType="Integer"/></t:DeleteItemField>"#,
            )
        );
    }

    #[test]
    fn parses_decimal_and_hex_tags() {
        assert_eq!(parse_property_tag("0x1000").unwrap(), 0x1000);
        assert_eq!(parse_property_tag("4096").unwrap(), 0x1000);
        assert!(parse_property_tag("0xZZ").is_err());
    }
}
