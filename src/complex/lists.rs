/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    xml::{EwsXmlWriter, XmlElement, XmlNamespace, NO_ATTRIBUTES},
    Error,
};

/// A list of strings, such as the categories of an item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/categories-ex15websvcsotherref>
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringList {
    values: Vec<String>,
    changed: bool,
}

impl StringList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
        self.changed = true;
    }

    /// Removes every occurrence of `value`, returning whether any was found.
    pub fn remove(&mut self, value: &str) -> bool {
        let before = self.values.len();
        self.values.retain(|existing| existing != value);

        let removed = self.values.len() != before;
        self.changed |= removed;
        removed
    }

    pub fn clear(&mut self) {
        if !self.values.is_empty() {
            self.values.clear();
            self.changed = true;
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|existing| existing == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.changed
    }

    pub fn clear_change_log(&mut self) {
        self.changed = false;
    }

    pub(crate) fn load_from_xml(element: &XmlElement) -> Result<Self, Error> {
        Ok(Self {
            values: element
                .children_named("String")
                .map(|child| child.text().to_owned())
                .collect(),
            changed: false,
        })
    }

    pub(crate) fn write_to_xml(
        &self,
        writer: &mut EwsXmlWriter,
        element_name: &str,
    ) -> Result<(), Error> {
        if self.values.is_empty() {
            return Ok(());
        }

        writer.write_element_with(
            XmlNamespace::Types,
            element_name,
            NO_ATTRIBUTES,
            |writer| {
                self.values.iter().try_for_each(|value| {
                    writer.write_element_value(XmlNamespace::Types, "String", value)
                })
            },
        )
    }
}

impl<S: Into<String>> FromIterator<S> for StringList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(Into::into).collect(),
            changed: true,
        }
    }
}

/// A single header of an internet message.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/internetmessageheader>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InternetMessageHeader {
    pub name: String,
    pub value: String,
}

/// The internet headers of an item, in the order the server returned them.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/internetmessageheaders>
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InternetMessageHeaders(pub Vec<InternetMessageHeader>);

impl InternetMessageHeaders {
    /// The value of the first header with the given name, compared
    /// case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|header| header.name.eq_ignore_ascii_case(name))
            .map(|header| header.value.as_str())
    }

    pub(crate) fn load_from_xml(element: &XmlElement) -> Result<Self, Error> {
        element
            .children_named("InternetMessageHeader")
            .map(|header| {
                Ok(InternetMessageHeader {
                    name: header.required_attribute("HeaderName")?.to_owned(),
                    value: header.text().to_owned(),
                })
            })
            .collect::<Result<_, Error>>()
            .map(Self)
    }

    pub(crate) fn write_to_xml(
        &self,
        writer: &mut EwsXmlWriter,
        element_name: &str,
    ) -> Result<(), Error> {
        writer.write_element_with(
            XmlNamespace::Types,
            element_name,
            NO_ATTRIBUTES,
            |writer| {
                self.0.iter().try_for_each(|header| {
                    writer.write_element_with(
                        XmlNamespace::Types,
                        "InternetMessageHeader",
                        [("HeaderName", header.name.as_str())],
                        |writer| writer.write_text(&header.value),
                    )
                })
            },
        )
    }
}
