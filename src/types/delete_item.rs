/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    types::{response::ResponseMessages, server_version::ExchangeServerVersion},
    xml::{bool_text, EwsXmlWriter, XmlElement, XmlNamespace, NO_ATTRIBUTES},
    DeleteType, Error, Item, ItemId, Operation,
};

/// A request to delete one or more Exchange items.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/deleteitem>
#[derive(Clone, Debug)]
pub struct DeleteItem {
    /// The method the server will use to perform the deletion.
    pub delete_type: DeleteType,

    /// Whether read receipts requested by deleted messages are withheld.
    pub suppress_read_receipts: Option<bool>,

    pub item_ids: Vec<ItemId>,
}

/// A response to a [`DeleteItem`] request.
pub type DeleteItemResponse = ResponseMessages<()>;

impl DeleteItem {
    pub fn new(delete_type: DeleteType, item_ids: Vec<ItemId>) -> Self {
        Self {
            delete_type,
            suppress_read_receipts: None,
            item_ids,
        }
    }

    /// Creates a request deleting saved items.
    pub fn for_items<'a>(
        delete_type: DeleteType,
        items: impl IntoIterator<Item = &'a Item>,
    ) -> Result<Self, Error> {
        let item_ids = items
            .into_iter()
            .map(|item| {
                item.id()?
                    .cloned()
                    .ok_or(Error::ObjectWithoutId("DeleteItem"))
            })
            .collect::<Result<_, _>>()?;

        Ok(Self::new(delete_type, item_ids))
    }
}

impl Operation for DeleteItem {
    type Response = DeleteItemResponse;

    const NAME: &'static str = "DeleteItem";

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attributes = vec![("DeleteType", self.delete_type.to_string())];
        if let Some(suppress) = self.suppress_read_receipts {
            attributes.push(("SuppressReadReceipts", bool_text(suppress).to_string()));
        }

        attributes
    }

    fn validate(&self) -> Result<(), Error> {
        if self.item_ids.is_empty() {
            return Err(Error::EmptyRequest(Self::NAME));
        }

        Ok(())
    }

    fn write_contents(
        &self,
        writer: &mut EwsXmlWriter,
        _version: ExchangeServerVersion,
    ) -> Result<(), Error> {
        writer.write_element_with(XmlNamespace::Messages, "ItemIds", NO_ATTRIBUTES, |writer| {
            self.item_ids.iter().try_for_each(|id| id.write(writer))
        })
    }

    fn load_response(&self, response: &XmlElement) -> Result<Self::Response, Error> {
        let messages = ResponseMessages::load(response, |_| Ok(()))?;
        messages.check_count(Self::NAME, self.item_ids.len());

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_utils::{parse_element, write_to_string},
        types::response::ResponseClass,
        ItemKind,
    };

    #[test]
    fn writes_ids_and_attributes() {
        let saved = Item::from_element(&parse_element(
            r#"<t:Message><t:ItemId Id="AAMkB1" ChangeKey="CQAAAC"/></t:Message>"#,
        ))
        .unwrap();

        let mut request = DeleteItem::for_items(DeleteType::MoveToDeletedItems, [&saved]).unwrap();
        request.suppress_read_receipts = Some(true);

        assert_eq!(
            request.attributes(),
            vec![
                ("DeleteType", "MoveToDeletedItems".to_string()),
                ("SuppressReadReceipts", "true".to_string()),
            ]
        );

        let written = write_to_string(|writer| {
            request.write_contents(writer, ExchangeServerVersion::Exchange2013_SP1)
        });
        assert_eq!(
            written,
            r#"<m:ItemIds><t:ItemId Id="AAMkB1" ChangeKey="CQAAAC"/></m:ItemIds>"#
        );

        let response = request
            .load_response(&parse_element(concat!(
                "<m:DeleteItemResponse><m:ResponseMessages>",
                r#"<m:DeleteItemResponseMessage ResponseClass="Success"><m:ResponseCode>NoError</m:ResponseCode></m:DeleteItemResponseMessage>"#,
                "</m:ResponseMessages></m:DeleteItemResponse>"
            )))
            .unwrap();
        assert_eq!(response.response_messages, vec![ResponseClass::Success(())]);
    }

    #[test]
    fn unsaved_items_cannot_be_deleted() {
        let unsaved = Item::new(ItemKind::Message);

        assert!(matches!(
            DeleteItem::for_items(DeleteType::HardDelete, [&unsaved]),
            Err(Error::ObjectWithoutId("DeleteItem"))
        ));
    }
}
