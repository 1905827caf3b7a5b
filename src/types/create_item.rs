/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    types::{
        response::{ItemsResponseMessage, ResponseMessages},
        server_version::ExchangeServerVersion,
    },
    xml::{EwsXmlWriter, XmlElement, XmlNamespace, NO_ATTRIBUTES},
    BaseFolderId, Error, Item, MessageDisposition, Operation, OperationResponse, ServiceObject,
};

/// A request to create (and optionally send) one or more Exchange items.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/createitem>
#[derive(Clone, Debug, Default)]
pub struct CreateItem {
    /// The action the Exchange server will take upon creating this item.
    ///
    /// This field is required for and only applicable to message items.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/createitem#messagedisposition-attribute>
    pub message_disposition: Option<MessageDisposition>,

    /// The folder in which to store an item once it has been created.
    ///
    /// This is ignored if `message_disposition` is [`SendOnly`].
    ///
    /// [`SendOnly`]: `MessageDisposition::SendOnly`
    pub saved_item_folder_id: Option<BaseFolderId>,

    /// The item or items to create.
    pub items: Vec<Item>,
}

/// A response to a [`CreateItem`] request.
pub type CreateItemResponse = ResponseMessages<ItemsResponseMessage>;

impl CreateItem {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    /// Updates the items of this request with what the server returned for
    /// them, such as their new ids. Items the server failed to create are
    /// left untouched, and the first such failure is returned.
    pub fn apply_response(&mut self, response: &CreateItemResponse) -> Result<(), Error> {
        let mut first_error = None;
        for (item, message) in self.items.iter_mut().zip(response.response_messages()) {
            match message.as_result() {
                Ok(ItemsResponseMessage { items }) => {
                    if let Some(returned) = items.first() {
                        item.apply_server_response(returned);
                    }
                }
                Err(err) => {
                    log::warn!("failed to create {} item: {err}", item.kind());
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

impl Operation for CreateItem {
    type Response = CreateItemResponse;

    const NAME: &'static str = "CreateItem";

    fn attributes(&self) -> Vec<(&'static str, String)> {
        self.message_disposition
            .map(|disposition| ("MessageDisposition", disposition.to_string()))
            .into_iter()
            .collect()
    }

    fn validate(&self) -> Result<(), Error> {
        if self.items.is_empty() {
            return Err(Error::EmptyRequest(Self::NAME));
        }

        if self.items.iter().any(|item| !item.is_new()) {
            return Err(Error::ObjectAlreadySaved(Self::NAME));
        }

        Ok(())
    }

    fn write_contents(
        &self,
        writer: &mut EwsXmlWriter,
        version: ExchangeServerVersion,
    ) -> Result<(), Error> {
        if let Some(folder_id) = &self.saved_item_folder_id {
            writer.write_element_with(
                XmlNamespace::Messages,
                "SavedItemFolderId",
                NO_ATTRIBUTES,
                |writer| folder_id.write(writer),
            )?;
        }

        writer.write_element_with(XmlNamespace::Messages, "Items", NO_ATTRIBUTES, |writer| {
            self.items
                .iter()
                .try_for_each(|item| item.write_to_xml(writer, version))
        })
    }

    fn load_response(&self, response: &XmlElement) -> Result<Self::Response, Error> {
        let messages = ResponseMessages::load(response, ItemsResponseMessage::from_element)?;
        messages.check_count(Self::NAME, self.items.len());

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_utils::{parse_element, write_to_string},
        DistinguishedFolderName, EmailMessage, ItemKind,
    };

    fn draft() -> CreateItem {
        let mut message = EmailMessage::new();
        message.set_subject("Quarterly report").unwrap();

        CreateItem {
            message_disposition: Some(MessageDisposition::SaveOnly),
            saved_item_folder_id: Some(DistinguishedFolderName::Drafts.into()),
            items: vec![message.into()],
        }
    }

    #[test]
    fn writes_new_items() {
        let request = draft();

        assert_eq!(
            request.attributes(),
            vec![("MessageDisposition", "SaveOnly".to_string())]
        );

        let written = write_to_string(|writer| {
            request.write_contents(writer, ExchangeServerVersion::Exchange2013_SP1)
        });
        assert_eq!(
            written,
            concat!(
                r#"<m:SavedItemFolderId><t:DistinguishedFolderId Id="drafts"/></m:SavedItemFolderId>"#,
                "<m:Items><t:Message><t:Subject>Quarterly report</t:Subject></t:Message></m:Items>"
            )
        );
    }

    #[test]
    fn refuses_empty_and_saved_items() {
        assert!(matches!(
            CreateItem::new(Vec::new()).validate(),
            Err(Error::EmptyRequest("CreateItem"))
        ));

        let saved = Item::from_element(&parse_element(concat!(
            "<t:Message>",
            r#"<t:ItemId Id="AAMkA" ChangeKey="CQAA"/>"#,
            "</t:Message>"
        )))
        .unwrap();
        assert!(matches!(
            CreateItem::new(vec![saved]).validate(),
            Err(Error::ObjectAlreadySaved("CreateItem"))
        ));
    }

    #[test]
    fn applies_returned_ids() {
        let mut request = draft();
        request.items.push(Item::new(ItemKind::Message));

        let response = request
            .load_response(&parse_element(concat!(
                "<m:CreateItemResponse><m:ResponseMessages>",
                r#"<m:CreateItemResponseMessage ResponseClass="Success">"#,
                "<m:ResponseCode>NoError</m:ResponseCode>",
                r#"<m:Items><t:Message><t:ItemId Id="AAMkNew" ChangeKey="CQAAAB"/></t:Message></m:Items>"#,
                "</m:CreateItemResponseMessage>",
                r#"<m:CreateItemResponseMessage ResponseClass="Error">"#,
                "<m:MessageText>Access is denied.</m:MessageText>",
                "<m:ResponseCode>ErrorAccessDenied</m:ResponseCode>",
                "</m:CreateItemResponseMessage>",
                "</m:ResponseMessages></m:CreateItemResponse>"
            )))
            .unwrap();

        let err = request.apply_response(&response).unwrap_err();
        assert!(matches!(err, Error::ResponseError(_)), "got {err:?}");

        let items = request.into_items();
        let created = &items[0];
        assert!(!created.is_new());
        assert!(!created.is_dirty());
        assert_eq!(created.id().unwrap().unwrap().id, "AAMkNew");
        assert_eq!(created.subject().unwrap(), Some("Quarterly report"));

        assert!(items[1].is_new());
    }
}
