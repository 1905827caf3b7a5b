/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    complex::ExtendedPropertyDefinition,
    property::{PropertyDefinition, ServiceObjectSchema},
    types::{server_version::ExchangeServerVersion, BaseShape, BodyType},
    xml::{bool_text, EwsXmlWriter, XmlNamespace, NO_ATTRIBUTES},
    Error,
};

/// A property named in the `AdditionalProperties` of a shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdditionalProperty {
    Property(&'static PropertyDefinition),
    Extended(ExtendedPropertyDefinition),
}

impl From<&'static PropertyDefinition> for AdditionalProperty {
    fn from(value: &'static PropertyDefinition) -> Self {
        AdditionalProperty::Property(value)
    }
}

impl From<ExtendedPropertyDefinition> for AdditionalProperty {
    fn from(value: ExtendedPropertyDefinition) -> Self {
        AdditionalProperty::Extended(value)
    }
}

/// The set of properties to return for each object of a `GetItem` or
/// `GetFolder` request.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/itemshape>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertySet {
    pub base_shape: BaseShape,

    /// The format bodies are returned in. Only applies to items.
    pub body_type: Option<BodyType>,

    /// Whether the MIME content of items is returned. Only applies to items.
    pub include_mime_content: Option<bool>,

    pub additional_properties: Vec<AdditionalProperty>,
}

impl PropertySet {
    pub fn new(base_shape: BaseShape) -> Self {
        Self {
            base_shape,
            body_type: None,
            include_mime_content: None,
            additional_properties: Vec::new(),
        }
    }

    pub fn id_only() -> Self {
        Self::new(BaseShape::IdOnly)
    }

    pub fn first_class_properties() -> Self {
        Self::new(BaseShape::AllProperties)
    }

    /// Adds a property to the set.
    pub fn with(mut self, property: impl Into<AdditionalProperty>) -> Self {
        self.additional_properties.push(property.into());
        self
    }

    /// The definitions a load with this set has asked the server for, so
    /// that their absence from a response means they have no value.
    pub fn requested_definitions(
        &self,
        schema: &'static ServiceObjectSchema,
    ) -> Vec<&'static PropertyDefinition> {
        let mut definitions = match self.base_shape {
            BaseShape::AllProperties => schema.first_class_properties(),
            // The default set differs per object type and server; only the id
            // is certain to be part of it.
            BaseShape::IdOnly | BaseShape::Default => schema.id_property().into_iter().collect(),
        };

        if self.include_mime_content == Some(true) {
            definitions.extend(schema.find("MimeContent"));
        }

        for property in &self.additional_properties {
            let definition = match property {
                AdditionalProperty::Property(definition) => Some(*definition),
                AdditionalProperty::Extended(_) => schema.extended_properties(),
            };

            if let Some(definition) = definition {
                if schema.contains(definition) && !definitions.contains(&definition) {
                    definitions.push(definition);
                }
            }
        }

        definitions
    }

    /// Writes an `ItemShape` element.
    pub(crate) fn write_item_shape(
        &self,
        writer: &mut EwsXmlWriter,
        version: ExchangeServerVersion,
    ) -> Result<(), Error> {
        writer.write_element_with(XmlNamespace::Messages, "ItemShape", NO_ATTRIBUTES, |writer| {
            writer.write_element_value(XmlNamespace::Types, "BaseShape", self.base_shape.as_str())?;
            writer.write_optional_element_value(
                XmlNamespace::Types,
                "IncludeMimeContent",
                self.include_mime_content.map(bool_text),
            )?;
            writer.write_optional_element_value(
                XmlNamespace::Types,
                "BodyType",
                self.body_type.as_ref().map(BodyType::as_str),
            )?;

            self.write_additional_properties(writer, version)
        })
    }

    /// Writes a `FolderShape` element. Item-only settings are ignored.
    pub(crate) fn write_folder_shape(
        &self,
        writer: &mut EwsXmlWriter,
        version: ExchangeServerVersion,
    ) -> Result<(), Error> {
        writer.write_element_with(
            XmlNamespace::Messages,
            "FolderShape",
            NO_ATTRIBUTES,
            |writer| {
                writer.write_element_value(
                    XmlNamespace::Types,
                    "BaseShape",
                    self.base_shape.as_str(),
                )?;

                self.write_additional_properties(writer, version)
            },
        )
    }

    fn write_additional_properties(
        &self,
        writer: &mut EwsXmlWriter,
        version: ExchangeServerVersion,
    ) -> Result<(), Error> {
        if self.additional_properties.is_empty() {
            return Ok(());
        }

        writer.write_element_with(
            XmlNamespace::Types,
            "AdditionalProperties",
            NO_ATTRIBUTES,
            |writer| {
                self.additional_properties
                    .iter()
                    .try_for_each(|property| match property {
                        AdditionalProperty::Property(definition) => {
                            definition.check_version(version)?;
                            definition.path().write(writer)
                        }
                        AdditionalProperty::Extended(definition) => definition.write(writer),
                    })
            },
        )
    }
}

impl Default for PropertySet {
    fn default() -> Self {
        Self::new(BaseShape::Default)
    }
}
