/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    types::{DateTime, FlagStatus},
    xml::{EwsXmlWriter, XmlElement, XmlNamespace, NO_ATTRIBUTES},
    Error,
};

/// The follow-up flag of an item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/flag>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flag {
    pub flag_status: FlagStatus,
    pub start_date: Option<DateTime>,
    pub due_date: Option<DateTime>,
    pub complete_date: Option<DateTime>,
}

impl Flag {
    pub fn new(flag_status: FlagStatus) -> Self {
        Self {
            flag_status,
            start_date: None,
            due_date: None,
            complete_date: None,
        }
    }

    pub(crate) fn load_from_xml(element: &XmlElement) -> Result<Self, Error> {
        Ok(Self {
            flag_status: element.required_child("FlagStatus")?.text().trim().parse()?,
            start_date: element.parse_child("StartDate")?,
            due_date: element.parse_child("DueDate")?,
            complete_date: element.parse_child("CompleteDate")?,
        })
    }

    pub(crate) fn write_to_xml(
        &self,
        writer: &mut EwsXmlWriter,
        element_name: &str,
    ) -> Result<(), Error> {
        let ns = XmlNamespace::Types;
        writer.write_element_with(ns, element_name, NO_ATTRIBUTES, |writer| {
            writer.write_element_value(ns, "FlagStatus", self.flag_status.as_str())?;

            for (name, date) in [
                ("StartDate", &self.start_date),
                ("DueDate", &self.due_date),
                ("CompleteDate", &self.complete_date),
            ] {
                if let Some(date) = date {
                    writer.write_element_value(ns, name, &date.to_xml_string()?)?;
                }
            }

            Ok(())
        })
    }
}
