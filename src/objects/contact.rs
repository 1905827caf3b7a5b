/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::ops::{Deref, DerefMut};

use crate::{
    complex::{
        EmailAddressDictionary, ImAddressDictionary, PhoneNumberDictionary,
        PhysicalAddressDictionary, StringList,
    },
    property::{PropertyBag, UpdateTarget},
    types::DateTime,
    Error,
};

use super::{schema::contact_schema, Item, ItemKind, ServiceObject, CONTACT_SCHEMA};

/// A contact in a contacts folder.
///
/// The item properties are reached through [`Deref`] to [`Item`].
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/contact>
#[derive(Clone, Debug)]
pub struct Contact {
    item: Item,
}

impl Contact {
    pub fn new() -> Self {
        Self {
            item: Item::new(ItemKind::Contact),
        }
    }

    pub fn into_item(self) -> Item {
        self.item
    }

    string_property!(
        /// How the contact is filed in the contacts folder.
        file_as, set_file_as, contact_schema::FILE_AS
    );
    string_property!(display_name, set_display_name, contact_schema::DISPLAY_NAME);
    string_property!(given_name, set_given_name, contact_schema::GIVEN_NAME);
    string_property!(initials, set_initials, contact_schema::INITIALS);
    string_property!(middle_name, set_middle_name, contact_schema::MIDDLE_NAME);
    string_property!(nickname, set_nickname, contact_schema::NICKNAME);
    string_property!(company_name, set_company_name, contact_schema::COMPANY_NAME);
    collection_property!(
        email_addresses,
        email_addresses_mut,
        contact_schema::EMAIL_ADDRESSES,
        EmailAddressDictionary
    );
    collection_property!(
        physical_addresses,
        physical_addresses_mut,
        contact_schema::PHYSICAL_ADDRESSES,
        PhysicalAddressDictionary
    );
    collection_property!(
        phone_numbers,
        phone_numbers_mut,
        contact_schema::PHONE_NUMBERS,
        PhoneNumberDictionary
    );
    string_property!(assistant_name, set_assistant_name, contact_schema::ASSISTANT_NAME);
    copy_property!(birthday, set_birthday, contact_schema::BIRTHDAY, DateTime);
    string_property!(
        business_home_page,
        set_business_home_page,
        contact_schema::BUSINESS_HOME_PAGE
    );
    collection_property!(children, children_mut, contact_schema::CHILDREN, StringList);
    collection_property!(companies, companies_mut, contact_schema::COMPANIES, StringList);
    string_property!(department, set_department, contact_schema::DEPARTMENT);
    string_property!(generation, set_generation, contact_schema::GENERATION);
    collection_property!(
        im_addresses,
        im_addresses_mut,
        contact_schema::IM_ADDRESSES,
        ImAddressDictionary
    );
    string_property!(job_title, set_job_title, contact_schema::JOB_TITLE);
    string_property!(manager, set_manager, contact_schema::MANAGER);
    string_property!(office_location, set_office_location, contact_schema::OFFICE_LOCATION);
    string_property!(profession, set_profession, contact_schema::PROFESSION);
    string_property!(spouse_name, set_spouse_name, contact_schema::SPOUSE_NAME);
    string_property!(surname, set_surname, contact_schema::SURNAME);
}

impl Default for Contact {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Contact {
    type Target = Item;

    fn deref(&self) -> &Item {
        &self.item
    }
}

impl DerefMut for Contact {
    fn deref_mut(&mut self) -> &mut Item {
        &mut self.item
    }
}

impl TryFrom<Item> for Contact {
    type Error = Error;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        if std::ptr::eq(item.schema(), &CONTACT_SCHEMA) {
            Ok(Self { item })
        } else {
            Err(Error::InvalidValue {
                kind: "Contact",
                value: item.kind().to_string(),
            })
        }
    }
}

impl From<Contact> for Item {
    fn from(contact: Contact) -> Self {
        contact.item
    }
}

impl ServiceObject for Contact {
    fn property_bag(&self) -> &PropertyBag {
        self.item.property_bag()
    }

    fn property_bag_mut(&mut self) -> &mut PropertyBag {
        self.item.property_bag_mut()
    }

    fn xml_element_name(&self) -> &'static str {
        self.item.xml_element_name()
    }

    fn update_target(&self) -> UpdateTarget {
        self.item.update_target()
    }
}
