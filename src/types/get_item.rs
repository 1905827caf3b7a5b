/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    types::{
        response::{ItemsResponseMessage, ResponseMessages},
        server_version::ExchangeServerVersion,
    },
    xml::{EwsXmlWriter, XmlElement, XmlNamespace, NO_ATTRIBUTES},
    Error, ItemId, Operation, PropertySet, ServiceObject,
};

/// A request for the properties of one or more Exchange items, e.g. messages,
/// calendar events, or contacts.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/getitem>
#[derive(Clone, Debug)]
pub struct GetItem {
    /// A description of the information to be included in the response for
    /// each item.
    pub item_shape: PropertySet,

    /// The Exchange identifiers of the items which should be fetched.
    pub item_ids: Vec<ItemId>,
}

/// A response to a [`GetItem`] request.
pub type GetItemResponse = ResponseMessages<ItemsResponseMessage>;

impl GetItem {
    pub fn new(item_shape: PropertySet, item_ids: Vec<ItemId>) -> Self {
        Self {
            item_shape,
            item_ids,
        }
    }
}

impl Operation for GetItem {
    type Response = GetItemResponse;

    const NAME: &'static str = "GetItem";

    fn validate(&self) -> Result<(), Error> {
        if self.item_ids.is_empty() {
            return Err(Error::EmptyRequest(Self::NAME));
        }

        Ok(())
    }

    fn write_contents(
        &self,
        writer: &mut EwsXmlWriter,
        version: ExchangeServerVersion,
    ) -> Result<(), Error> {
        self.item_shape.write_item_shape(writer, version)?;

        writer.write_element_with(XmlNamespace::Messages, "ItemIds", NO_ATTRIBUTES, |writer| {
            self.item_ids.iter().try_for_each(|id| id.write(writer))
        })
    }

    fn load_response(&self, response: &XmlElement) -> Result<Self::Response, Error> {
        let messages = ResponseMessages::load(response, |message| {
            let mut loaded = ItemsResponseMessage::from_element(message)?;

            // Properties the shape asked for but the server left out have no
            // value, rather than being unknown.
            for item in &mut loaded.items {
                let requested = self.item_shape.requested_definitions(item.schema());
                item.property_bag_mut().mark_requested(requested);
            }

            Ok(loaded)
        })?;
        messages.check_count(Self::NAME, self.item_ids.len());

        Ok(messages)
    }
}
