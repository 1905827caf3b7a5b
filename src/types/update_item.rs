/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    types::{
        response::{ResponseMessages, UpdateItemResponseMessage},
        server_version::ExchangeServerVersion,
    },
    xml::{EwsXmlWriter, XmlElement, XmlNamespace, NO_ATTRIBUTES},
    ConflictResolution, Error, Item, MessageDisposition, Operation, OperationResponse,
    ServiceObject,
};

/// A request to update properties of one or more Exchange items.
///
/// Only the changes recorded by each item since it was loaded are sent.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/updateitem>
#[derive(Clone, Debug, Default)]
pub struct UpdateItem {
    /// The action the Exchange server will take upon updating this item.
    ///
    /// This field is required for and only applicable to message items.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/updateitem#messagedisposition-attribute>
    pub message_disposition: Option<MessageDisposition>,

    /// The method the Exchange server will use to resolve conflicts between
    /// updates.
    ///
    /// If omitted, the server will default to [`AutoResolve`].
    ///
    /// [`AutoResolve`]: `ConflictResolution::AutoResolve`
    pub conflict_resolution: Option<ConflictResolution>,

    items: Vec<Item>,
}

/// A response to an [`UpdateItem`] request.
pub type UpdateItemResponse = ResponseMessages<UpdateItemResponseMessage>;

impl UpdateItem {
    /// Creates a request updating `items`. Items without changes are left
    /// out, since the server refuses item changes with no updates.
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        let items = items
            .into_iter()
            .filter(|item| {
                let dirty = item.is_dirty();
                if !dirty {
                    log::debug!("leaving unchanged {} item out of UpdateItem", item.kind());
                }
                dirty
            })
            .collect();

        Self {
            items,
            ..Default::default()
        }
    }

    /// The items this request will update.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Updates the items of this request with what the server returned for
    /// them, usually their new change keys. Items the server failed to update
    /// keep their pending changes, and the first such failure is returned.
    pub fn apply_response(&mut self, response: &UpdateItemResponse) -> Result<(), Error> {
        let mut first_error = None;
        for (item, message) in self.items.iter_mut().zip(response.response_messages()) {
            match message.as_result() {
                Ok(message) => {
                    if let Some(count) = message.conflict_count.filter(|count| *count > 0) {
                        log::info!("server resolved {count} conflicts updating {} item", item.kind());
                    }

                    match message.items.first() {
                        Some(returned) => item.apply_server_response(returned),
                        None => item.property_bag_mut().clear_change_log(),
                    }
                }
                Err(err) => {
                    log::warn!("failed to update {} item: {err}", item.kind());
                    first_error.get_or_insert_with(|| err.clone());
                }
            }
        }

        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}

impl Operation for UpdateItem {
    type Response = UpdateItemResponse;

    const NAME: &'static str = "UpdateItem";

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attributes = Vec::new();
        if let Some(disposition) = self.message_disposition {
            attributes.push(("MessageDisposition", disposition.to_string()));
        }
        if let Some(resolution) = self.conflict_resolution {
            attributes.push(("ConflictResolution", resolution.to_string()));
        }

        attributes
    }

    fn validate(&self) -> Result<(), Error> {
        if self.items.is_empty() {
            return Err(Error::EmptyRequest(Self::NAME));
        }

        if self.items.iter().any(|item| item.is_new()) {
            return Err(Error::ObjectWithoutId(Self::NAME));
        }

        Ok(())
    }

    fn write_contents(
        &self,
        writer: &mut EwsXmlWriter,
        version: ExchangeServerVersion,
    ) -> Result<(), Error> {
        writer.write_element_with(
            XmlNamespace::Messages,
            "ItemChanges",
            NO_ATTRIBUTES,
            |writer| {
                self.items.iter().try_for_each(|item| {
                    let id = item.id()?.ok_or(Error::ObjectWithoutId(Self::NAME))?;

                    writer.write_element_with(
                        XmlNamespace::Types,
                        "ItemChange",
                        NO_ATTRIBUTES,
                        |writer| {
                            id.write(writer)?;
                            writer.write_element_with(
                                XmlNamespace::Types,
                                "Updates",
                                NO_ATTRIBUTES,
                                |writer| item.write_updates_to_xml(writer, version),
                            )
                        },
                    )
                })
            },
        )
    }

    fn load_response(&self, response: &XmlElement) -> Result<Self::Response, Error> {
        let messages = ResponseMessages::load(response, UpdateItemResponseMessage::from_element)?;
        messages.check_count(Self::NAME, self.items.len());

        Ok(messages)
    }
}
