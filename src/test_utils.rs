/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use quick_xml::de::Deserializer;
use serde::Deserialize;

use crate::{
    xml::{EwsXmlWriter, XmlElement},
    Error,
};

/// Runs `write` against a fresh writer and returns what it wrote.
pub fn write_to_string<F>(write: F) -> String
where
    F: FnOnce(&mut EwsXmlWriter) -> Result<(), Error>,
{
    let mut writer = EwsXmlWriter::new();
    write(&mut writer).unwrap();

    String::from_utf8(writer.into_inner()).unwrap()
}

/// Assert the expected result of XML serialization.
pub fn assert_written<F>(write: F, expected_xml_content: &str)
where
    F: FnOnce(&mut EwsXmlWriter) -> Result<(), Error>,
{
    assert_eq!(write_to_string(write), expected_xml_content);
}

/// Parses a fragment of XML, e.g. a single property element.
pub fn parse_element(content: &str) -> XmlElement {
    XmlElement::parse(content.as_bytes()).unwrap()
}

/// Assert the expected result of XML deserialization.
pub fn assert_deserialized_content<T>(content: &str, expected: T)
where
    T: for<'a> Deserialize<'a> + PartialEq + std::fmt::Debug,
{
    let mut deserializer = Deserializer::from_reader(content.as_bytes());
    let deserialized_data: T = serde_path_to_error::deserialize(&mut deserializer).unwrap();
    assert_eq!(deserialized_data, expected);
}
