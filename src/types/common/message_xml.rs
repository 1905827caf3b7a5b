/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::{xml::XmlElement, Error};

/// Semi-structured data attached to an EWS error, either in a SOAP fault or
/// in an error response message.
///
/// Only the shapes that callers act on get a dedicated variant; everything
/// else is kept as a flat list of elements in `Other`.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/messagexml>
// Two structurings have been observed, never mixed and never more than one
// level deep:
// - `<t:Value Name="Foo">value</t:Value>`
// - `<t:Foo>value</t:Foo>`
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
#[non_exhaustive]
pub enum MessageXml {
    ServerBusy(ServerBusy),
    // Must come last, since it matches any single-layer XML.
    Other(MessageXmlElements),
}

impl MessageXml {
    /// Reads a `MessageXml` element from a parsed response message.
    pub(crate) fn from_element(element: &XmlElement) -> Result<Self, Error> {
        let elements: Vec<MessageXmlElement> = element
            .children()
            .map(|child| {
                if child.name() == "Value" {
                    MessageXmlElement::MessageXmlValue(MessageXmlValue {
                        name: child.attribute("Name").unwrap_or_default().to_owned(),
                        value: child.text().to_owned(),
                    })
                } else {
                    MessageXmlElement::MessageXmlTagged(MessageXmlTagged {
                        name: child.name().to_owned(),
                        value: child.text().to_owned(),
                    })
                }
            })
            .collect();

        let back_off = elements.iter().find_map(|element| match element {
            MessageXmlElement::MessageXmlValue(value) if value.name == "BackOffMilliseconds" => {
                Some(value.value.as_str())
            }
            _ => None,
        });

        match back_off {
            Some(value) => {
                let back_off_milliseconds = value.trim().parse().map_err(|_| {
                    Error::InvalidValue {
                        kind: "BackOffMilliseconds",
                        value: value.to_owned(),
                    }
                })?;
                Ok(MessageXml::ServerBusy(ServerBusy {
                    back_off_milliseconds,
                }))
            }
            None => Ok(MessageXml::Other(MessageXmlElements { elements })),
        }
    }
}

/// A `<t:Value Name="...">` element.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct MessageXmlValue {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "$text")]
    pub value: String,
}

/// An element whose tag is its name and whose text is its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageXmlTagged {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageXmlElements {
    pub elements: Vec<MessageXmlElement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageXmlElement {
    MessageXmlTagged(MessageXmlTagged),
    MessageXmlValue(MessageXmlValue),
}

/// Data attached to a [`ResponseCode::ErrorServerBusy`](crate::response::ResponseCode::ErrorServerBusy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerBusy {
    /// How long to wait before sending further requests.
    pub back_off_milliseconds: u32,
}

struct ServerBusyVisitor;

impl<'de> Visitor<'de> for ServerBusyVisitor {
    type Value = ServerBusy;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a Value element with Name=BackOffMilliseconds and an integer value")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        while let Some(name) = access.next_key::<String>()? {
            if name.as_str() != "Value" {
                access.next_value::<de::IgnoredAny>()?;
                continue;
            }

            let value = access.next_value::<MessageXmlValue>()?;
            if value.name.as_str() == "BackOffMilliseconds" {
                let back_off_milliseconds = value.value.parse::<u32>().map_err(de::Error::custom)?;
                return Ok(ServerBusy {
                    back_off_milliseconds,
                });
            }
        }

        Err(de::Error::custom("no BackOffMilliseconds field"))
    }
}

impl<'de> Deserialize<'de> for ServerBusy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ServerBusyVisitor)
    }
}

/// Extracts the text of an element while discarding a namespace declaration
/// for the types namespace, which quick-xml reports as a key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
enum Text {
    #[serde(rename = "$text")]
    Text(String),
    #[serde(rename = "http://schemas.microsoft.com/exchange/services/2006/types")]
    TypesNsDeclaration,
}

struct MessageXmlElementsVisitor;

impl<'de> Visitor<'de> for MessageXmlElementsVisitor {
    type Value = MessageXmlElements;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("non-recursive XML elements with @Name or no attributes")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut elements = vec![];

        while let Some(name) = access.next_key::<String>()? {
            if name.starts_with('@') {
                access.next_value::<de::IgnoredAny>()?;
            } else if name.as_str() == "Value" {
                let element = access.next_value::<MessageXmlValue>()?;
                elements.push(MessageXmlElement::MessageXmlValue(element));
            } else if let Text::Text(value) = access.next_value::<Text>()? {
                let element = MessageXmlTagged { name, value };
                elements.push(MessageXmlElement::MessageXmlTagged(element));
            }
        }

        Ok(MessageXmlElements { elements })
    }
}

impl<'de> Deserialize<'de> for MessageXmlElements {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MessageXmlElementsVisitor)
    }
}
