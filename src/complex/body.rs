/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    types::BodyType,
    xml::{parse_bool, EwsXmlWriter, XmlElement, XmlNamespace},
    Error,
};

/// The body of an item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/body>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageBody {
    pub body_type: BodyType,

    /// Set by the server when only part of the body was returned. Never
    /// sent.
    pub is_truncated: Option<bool>,

    pub content: String,
}

impl MessageBody {
    pub fn new(body_type: BodyType, content: impl Into<String>) -> Self {
        Self {
            body_type,
            is_truncated: None,
            content: content.into(),
        }
    }

    pub(crate) fn load_from_xml(element: &XmlElement) -> Result<Self, Error> {
        let body_type = element.required_attribute("BodyType")?.parse()?;
        let is_truncated = element.attribute("IsTruncated").map(parse_bool).transpose()?;

        Ok(Self {
            body_type,
            is_truncated,
            content: element.text().to_owned(),
        })
    }

    pub(crate) fn write_to_xml(
        &self,
        writer: &mut EwsXmlWriter,
        element_name: &str,
    ) -> Result<(), Error> {
        writer.write_element_with(
            XmlNamespace::Types,
            element_name,
            [("BodyType", self.body_type.as_str())],
            |writer| writer.write_text(&self.content),
        )
    }
}

/// The base64-encoded MIME content of an item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/mimecontent>
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MimeContent {
    pub character_set: Option<String>,
    pub content: String,
}

impl MimeContent {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            character_set: None,
            content: content.into(),
        }
    }

    pub(crate) fn load_from_xml(element: &XmlElement) -> Result<Self, Error> {
        Ok(Self {
            character_set: element.attribute("CharacterSet").map(str::to_owned),
            content: element.text().trim().to_owned(),
        })
    }

    pub(crate) fn write_to_xml(
        &self,
        writer: &mut EwsXmlWriter,
        element_name: &str,
    ) -> Result<(), Error> {
        let attributes = self
            .character_set
            .as_deref()
            .map(|character_set| ("CharacterSet", character_set));

        writer.write_element_with(XmlNamespace::Types, element_name, attributes, |writer| {
            writer.write_text(&self.content)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_written, parse_element};

    #[test]
    fn reads_truncated_body() {
        let body = MessageBody::load_from_xml(&parse_element(
            r#"<t:Body BodyType="HTML" IsTruncated="true">&lt;p&gt;Hi&lt;/p&gt;</t:Body>"#,
        ))
        .unwrap();

        assert_eq!(body.body_type, BodyType::HTML);
        assert_eq!(body.is_truncated, Some(true));
        assert_eq!(body.content, "<p>Hi</p>");
    }

    #[test]
    fn writes_body_without_truncation_flag() {
        let mut body = MessageBody::new(BodyType::HTML, "<p>Hi</p>");
        body.is_truncated = Some(false);

        assert_written(
            |writer| body.write_to_xml(writer, "Body"),
            r#"<t:Body BodyType="HTML">&lt;p&gt;Hi&lt;/p&gt;</t:Body>"#,
        );
    }

    #[test]
    fn rejects_unknown_body_type() {
        assert!(
            MessageBody::load_from_xml(&parse_element(r#"<t:Body BodyType="Rtf">x</t:Body>"#))
                .is_err()
        );
    }

    #[test]
    fn mime_content_keeps_character_set() {
        let mime = MimeContent::load_from_xml(&parse_element(
            r#"<t:MimeContent CharacterSet="UTF-8">RnJvbTog</t:MimeContent>"#,
        ))
        .unwrap();
        assert_eq!(mime.character_set.as_deref(), Some("UTF-8"));

        assert_written(
            |writer| mime.write_to_xml(writer, "MimeContent"),
            r#"<t:MimeContent CharacterSet="UTF-8">RnJvbTog</t:MimeContent>"#,
        );
    }
}
