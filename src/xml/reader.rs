/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::str::FromStr;

use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use crate::Error;

/// An element of a parsed XML document.
///
/// Element and attribute names are local names: namespace prefixes are
/// dropped, as are namespace declarations. EWS never uses the same local
/// name for two different elements in a position where it would matter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    /// Parses a complete document, returning its root element.
    pub fn parse(document: &[u8]) -> Result<Self, Error> {
        let mut reader = Reader::from_reader(document);
        let mut buf = Vec::new();

        let mut open: Vec<XmlElement> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(start) => open.push(XmlElement::from_start(&start)?),
                Event::Empty(start) => {
                    let element = XmlElement::from_start(&start)?;
                    attach(&mut open, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = open.pop().ok_or_else(|| {
                        Error::UnexpectedResponse("unbalanced closing tag".to_string())
                    })?;
                    attach(&mut open, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(current) = open.last_mut() {
                        let text = text.unescape().map_err(quick_xml::Error::from)?;
                        current.text.push_str(&text);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = open.last_mut() {
                        let data = data.into_inner();
                        current.text.push_str(utf8(&data)?);
                    }
                }
                Event::Eof => break,
                _ => (),
            }

            buf.clear();
        }

        if let Some(element) = open.last() {
            return Err(Error::UnexpectedResponse(format!(
                "document ended inside element `{}`",
                element.name
            )));
        }

        root.ok_or_else(|| Error::UnexpectedResponse("document has no root element".to_string()))
    }

    fn from_start(start: &BytesStart) -> Result<Self, Error> {
        let name = utf8(start.local_name().as_ref())?.to_owned();

        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            if attribute.key.as_namespace_binding().is_some() {
                continue;
            }

            let key = utf8(attribute.key.local_name().as_ref())?.to_owned();
            let value = attribute
                .unescape_value()
                .map_err(quick_xml::Error::from)?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The text content of this element, including any whitespace between
    /// child elements.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn required_attribute(&self, name: &str) -> Result<&str, Error> {
        self.attribute(name).ok_or_else(|| {
            Error::UnexpectedResponse(format!(
                "element `{}` is missing attribute `{name}`",
                self.name
            ))
        })
    }

    pub fn children(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter()
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn required_child(&self, name: &str) -> Result<&XmlElement, Error> {
        self.child(name).ok_or_else(|| {
            Error::UnexpectedResponse(format!(
                "element `{}` is missing child `{name}`",
                self.name
            ))
        })
    }

    /// The text of the named child, if present.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(XmlElement::text)
    }

    /// Parses the trimmed text of this element.
    pub fn parse_text<T: FromStr>(&self) -> Result<T, Error> {
        let text = self.text.trim();
        text.parse().map_err(|_| {
            Error::UnexpectedResponse(format!(
                "invalid value `{text}` in element `{}`",
                self.name
            ))
        })
    }

    /// Parses the text of the named child, if present.
    pub fn parse_child<T: FromStr>(&self, name: &str) -> Result<Option<T>, Error> {
        self.child(name).map(XmlElement::parse_text).transpose()
    }
}

fn attach(
    open: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), Error> {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(Error::UnexpectedResponse(
                "document has more than one root element".to_string(),
            ))
        }
    }

    Ok(())
}

fn utf8(bytes: &[u8]) -> Result<&str, Error> {
    std::str::from_utf8(bytes).map_err(|err| Error::UnexpectedResponse(err.to_string()))
}
