/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use crate::Error;

use super::XmlNamespace;

/// A compact XML writer which knows about EWS namespace prefixes.
///
/// All element names passed to this writer are local names; the prefix is
/// derived from the [`XmlNamespace`] they are written in.
pub struct EwsXmlWriter {
    writer: Writer<Vec<u8>>,
}

impl Default for EwsXmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl EwsXmlWriter {
    pub fn new() -> Self {
        let inner: Vec<u8> = Default::default();
        Self {
            writer: Writer::new(inner),
        }
    }

    /// Consumes the writer, returning the bytes written so far.
    pub fn into_inner(self) -> Vec<u8> {
        self.writer.into_inner()
    }

    /// Writes an XML declaration for a UTF-8 encoded XML 1.0 document.
    pub fn write_declaration(&mut self) -> Result<(), Error> {
        // All EWS examples use XML 1.0 with UTF-8, so stick to that.
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        Ok(())
    }

    pub fn write_start_element<I, K, V>(
        &mut self,
        namespace: XmlNamespace,
        local_name: &str,
        attributes: I,
    ) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let start = start_tag(namespace, local_name, attributes);
        self.writer.write_event(Event::Start(start))?;

        Ok(())
    }

    pub fn write_end_element(
        &mut self,
        namespace: XmlNamespace,
        local_name: &str,
    ) -> Result<(), Error> {
        self.writer
            .write_event(Event::End(BytesEnd::new(qualified(namespace, local_name))))?;

        Ok(())
    }

    /// Writes a self-closing element, e.g. `<t:FieldURI FieldURI="item:Subject"/>`.
    pub fn write_empty_element<I, K, V>(
        &mut self,
        namespace: XmlNamespace,
        local_name: &str,
        attributes: I,
    ) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let start = start_tag(namespace, local_name, attributes);
        self.writer.write_event(Event::Empty(start))?;

        Ok(())
    }

    /// Writes escaped text content at the current position.
    pub fn write_text(&mut self, text: &str) -> Result<(), Error> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;

        Ok(())
    }

    /// Writes an element containing only the given text.
    pub fn write_element_value(
        &mut self,
        namespace: XmlNamespace,
        local_name: &str,
        value: &str,
    ) -> Result<(), Error> {
        self.write_element_with(namespace, local_name, NO_ATTRIBUTES, |writer| {
            writer.write_text(value)
        })
    }

    /// Writes an element with optional text, skipping it entirely when the
    /// value is absent.
    pub fn write_optional_element_value(
        &mut self,
        namespace: XmlNamespace,
        local_name: &str,
        value: Option<&str>,
    ) -> Result<(), Error> {
        match value {
            Some(value) => self.write_element_value(namespace, local_name, value),
            None => Ok(()),
        }
    }

    /// Writes an element, delegating its contents to `content`.
    pub fn write_element_with<I, K, V, F>(
        &mut self,
        namespace: XmlNamespace,
        local_name: &str,
        attributes: I,
        content: F,
    ) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        self.write_start_element(namespace, local_name, attributes)?;
        content(self)?;
        self.write_end_element(namespace, local_name)
    }
}

/// An empty attribute list, for calls which need to name the attribute types.
pub const NO_ATTRIBUTES: [(&str, &str); 0] = [];

fn qualified(namespace: XmlNamespace, local_name: &str) -> String {
    format!("{}:{}", namespace.prefix(), local_name)
}

fn start_tag<'a, I, K, V>(namespace: XmlNamespace, local_name: &str, attributes: I) -> BytesStart<'a>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut start = BytesStart::new(qualified(namespace, local_name));
    for (key, value) in attributes {
        start.push_attribute((key.as_ref(), value.as_ref()));
    }

    start
}
