/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Property values made up of more than a single piece of text.
//!
//! Collections here keep their own change log, so that the property bag can
//! write updates touching only the entries which changed.

mod body;
mod dictionary;
mod extended;
mod flag;
mod lists;
mod mailbox;

pub use body::{MessageBody, MimeContent};
pub use dictionary::{
    DictionaryEntry, DictionaryKey, DictionaryProperty, DictionaryUpdate, EmailAddressDictionary,
    EmailAddressKey, EntryChange, ImAddressDictionary, ImAddressKey, PhoneNumberDictionary,
    PhoneNumberKey, PhysicalAddressDictionary, PhysicalAddressEntry, PhysicalAddressField,
    PhysicalAddressKey,
};
pub use extended::{
    ExtendedProperty, ExtendedPropertyCollection, ExtendedPropertyDefinition,
    ExtendedPropertyValue,
};
pub use flag::Flag;
pub use lists::{InternetMessageHeader, InternetMessageHeaders, StringList};
pub use mailbox::{Mailbox, Recipients};

/// Added, modified and removed keys of a keyed collection.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ChangeLog<K> {
    added: Vec<K>,
    modified: Vec<K>,
    removed: Vec<K>,
}

impl<K> Default for ChangeLog<K> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            modified: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<K: Clone + PartialEq> ChangeLog<K> {
    /// Records a value being assigned to `key`, which either already had one
    /// or did not.
    pub(crate) fn record_set(&mut self, key: &K, existed: bool) {
        if self.added.contains(key) || self.modified.contains(key) {
            return;
        }

        if let Some(position) = self.removed.iter().position(|removed| removed == key) {
            // Removed and then set again: the server still has an entry.
            self.removed.remove(position);
            self.modified.push(key.clone());
        } else if existed {
            self.modified.push(key.clone());
        } else {
            self.added.push(key.clone());
        }
    }

    /// Records the value of `key` being removed.
    pub(crate) fn record_remove(&mut self, key: &K) {
        if let Some(position) = self.added.iter().position(|added| added == key) {
            // Never sent, so there is nothing to remove on the server.
            self.added.remove(position);
            return;
        }

        self.modified.retain(|modified| modified != key);
        if !self.removed.contains(key) {
            self.removed.push(key.clone());
        }
    }

    pub(crate) fn is_added(&self, key: &K) -> bool {
        self.added.contains(key)
    }

    pub(crate) fn is_modified(&self, key: &K) -> bool {
        self.modified.contains(key)
    }

    pub(crate) fn removed(&self) -> &[K] {
        &self.removed
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.added.clear();
        self.modified.clear();
        self.removed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::ChangeLog;

    #[test]
    fn change_log_collapses_redundant_changes() {
        let mut log = ChangeLog::default();

        log.record_set(&"a", false);
        log.record_remove(&"a");
        assert!(log.is_empty());

        log.record_set(&"b", true);
        log.record_set(&"b", true);
        assert!(log.is_modified(&"b"));
        log.record_remove(&"b");
        assert!(!log.is_modified(&"b"));
        assert_eq!(log.removed(), ["b"]);

        log.record_set(&"b", false);
        assert!(log.removed().is_empty());
        assert!(log.is_modified(&"b"));
        assert!(!log.is_added(&"b"));

        log.clear();
        assert!(log.is_empty());
    }
}
