/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    types::{ItemId, MailboxType},
    xml::{EwsXmlWriter, XmlElement, XmlNamespace, NO_ATTRIBUTES},
    Error,
};

/// A mail user, either as a sender or recipient, or as the owner of a
/// mailbox being accessed.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/mailbox>
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mailbox {
    /// The display name of the user.
    pub name: Option<String>,

    /// The primary SMTP address of the user, or another address depending on
    /// `routing_type`.
    pub email_address: Option<String>,

    /// The protocol used in routing to this mailbox, usually `SMTP`.
    pub routing_type: Option<String>,

    pub mailbox_type: Option<MailboxType>,

    /// The identifier of a contact or distribution list this mailbox was
    /// resolved from.
    pub item_id: Option<ItemId>,
}

impl Mailbox {
    pub fn new(email_address: impl Into<String>) -> Self {
        Self {
            email_address: Some(email_address.into()),
            ..Default::default()
        }
    }

    pub fn with_name(name: impl Into<String>, email_address: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email_address: Some(email_address.into()),
            ..Default::default()
        }
    }

    pub(crate) fn load_from_xml(element: &XmlElement) -> Result<Self, Error> {
        let mailbox_type = match element.child_text("MailboxType") {
            Some(text) => match text.trim().parse() {
                Ok(mailbox_type) => Some(mailbox_type),
                Err(_) => {
                    log::debug!("ignoring unrecognized mailbox type `{text}`");
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            name: element.child_text("Name").map(str::to_owned),
            email_address: element.child_text("EmailAddress").map(str::to_owned),
            routing_type: element.child_text("RoutingType").map(str::to_owned),
            mailbox_type,
            item_id: element.child("ItemId").map(ItemId::from_element).transpose()?,
        })
    }

    pub(crate) fn write_to_xml(
        &self,
        writer: &mut EwsXmlWriter,
        element_name: &str,
    ) -> Result<(), Error> {
        let ns = XmlNamespace::Types;
        writer.write_element_with(ns, element_name, NO_ATTRIBUTES, |writer| {
            writer.write_optional_element_value(ns, "Name", self.name.as_deref())?;
            writer.write_optional_element_value(
                ns,
                "EmailAddress",
                self.email_address.as_deref(),
            )?;
            writer.write_optional_element_value(ns, "RoutingType", self.routing_type.as_deref())?;
            writer.write_optional_element_value(
                ns,
                "MailboxType",
                self.mailbox_type.as_ref().map(MailboxType::as_str),
            )?;
            if let Some(item_id) = &self.item_id {
                item_id.write(writer)?;
            }

            Ok(())
        })
    }
}

/// An ordered list of mailboxes, such as the recipients of a message.
///
/// The list remembers whether it was changed since it was loaded; an update
/// always replaces the whole list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recipients {
    mailboxes: Vec<Mailbox>,
    changed: bool,
}

impl Recipients {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mailbox: Mailbox) {
        self.mailboxes.push(mailbox);
        self.changed = true;
    }

    pub fn remove(&mut self, index: usize) -> Option<Mailbox> {
        if index >= self.mailboxes.len() {
            return None;
        }

        self.changed = true;
        Some(self.mailboxes.remove(index))
    }

    /// Removes every mailbox with the given address, returning whether any
    /// was found.
    pub fn remove_address(&mut self, email_address: &str) -> bool {
        let before = self.mailboxes.len();
        self.mailboxes
            .retain(|mailbox| mailbox.email_address.as_deref() != Some(email_address));

        let removed = self.mailboxes.len() != before;
        self.changed |= removed;
        removed
    }

    pub fn clear(&mut self) {
        if !self.mailboxes.is_empty() {
            self.mailboxes.clear();
            self.changed = true;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mailbox> {
        self.mailboxes.iter()
    }

    pub fn len(&self) -> usize {
        self.mailboxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mailboxes.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.changed
    }

    pub fn clear_change_log(&mut self) {
        self.changed = false;
    }

    pub(crate) fn load_from_xml(element: &XmlElement) -> Result<Self, Error> {
        let mailboxes = element
            .children_named("Mailbox")
            .map(Mailbox::load_from_xml)
            .collect::<Result<_, _>>()?;

        Ok(Self {
            mailboxes,
            changed: false,
        })
    }

    pub(crate) fn write_to_xml(
        &self,
        writer: &mut EwsXmlWriter,
        element_name: &str,
    ) -> Result<(), Error> {
        if self.mailboxes.is_empty() {
            return Ok(());
        }

        writer.write_element_with(
            XmlNamespace::Types,
            element_name,
            NO_ATTRIBUTES,
            |writer| {
                self.mailboxes
                    .iter()
                    .try_for_each(|mailbox| mailbox.write_to_xml(writer, "Mailbox"))
            },
        )
    }
}

impl FromIterator<Mailbox> for Recipients {
    fn from_iter<T: IntoIterator<Item = Mailbox>>(iter: T) -> Self {
        Self {
            mailboxes: iter.into_iter().collect(),
            changed: true,
        }
    }
}

impl<'a> IntoIterator for &'a Recipients {
    type Item = &'a Mailbox;
    type IntoIter = std::slice::Iter<'a, Mailbox>;

    fn into_iter(self) -> Self::IntoIter {
        self.mailboxes.iter()
    }
}
