/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use serde::{
    de::{IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer,
};

use crate::types::server_version::ServerVersionInfo;

use super::{Fault, Header};

/// A helper for the first pass over a response document, which picks out
/// the headers and any SOAP fault before the body is read element by element.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct DeserializeEnvelope {
    #[serde(default)]
    pub header: Option<DeserializeHeaders>,

    #[serde(deserialize_with = "deserialize_body")]
    pub body: EnvelopeContent,
}

/// The response headers this crate understands. Any others are skipped.
#[derive(Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct DeserializeHeaders {
    server_version_info: Option<ServerVersionInfo>,
}

impl DeserializeHeaders {
    pub fn into_headers(self) -> Vec<Header> {
        self.server_version_info
            .map(Header::ServerVersionInfo)
            .into_iter()
            .collect()
    }
}

/// What a SOAP body holds: either a fault or the name of the response
/// element.
pub(super) enum EnvelopeContent {
    Response(String),
    Fault(Fault),
}

fn deserialize_body<'de, D>(body: D) -> Result<EnvelopeContent, D::Error>
where
    D: Deserializer<'de>,
{
    body.deserialize_map(BodyVisitor)
}

struct BodyVisitor;

impl<'de> Visitor<'de> for BodyVisitor {
    type Value = EnvelopeContent;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("EWS operation response body")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut content = None;

        // quick-xml needs the final `None` key consumed to finish the map,
        // so keep reading even once the content is known.
        while let Some(name) = map.next_key::<String>()? {
            if name.starts_with('@') {
                // Attributes on the body, such as namespace declarations.
                map.next_value::<IgnoredAny>()?;
                continue;
            }

            if content.is_some() {
                return Err(serde::de::Error::custom(format_args!(
                    "unexpected element `{name}`"
                )));
            }

            content = Some(if name == "Fault" {
                EnvelopeContent::Fault(map.next_value()?)
            } else {
                map.next_value::<IgnoredAny>()?;
                EnvelopeContent::Response(name)
            });
        }

        content.ok_or_else(|| serde::de::Error::invalid_type(serde::de::Unexpected::Map, &self))
    }
}
