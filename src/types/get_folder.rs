/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    types::{
        response::{FoldersResponseMessage, ResponseMessages},
        server_version::ExchangeServerVersion,
    },
    xml::{EwsXmlWriter, XmlElement, XmlNamespace, NO_ATTRIBUTES},
    BaseFolderId, Error, Operation, PropertySet, ServiceObject,
};

/// A request to get information on one or more folders.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/getfolder>
#[derive(Clone, Debug)]
pub struct GetFolder {
    /// A description of the information to be included in the response for
    /// each folder.
    pub folder_shape: PropertySet,

    /// The folders to get.
    pub folder_ids: Vec<BaseFolderId>,
}

/// A response to a [`GetFolder`] request.
pub type GetFolderResponse = ResponseMessages<FoldersResponseMessage>;

impl GetFolder {
    pub fn new(folder_shape: PropertySet, folder_ids: Vec<BaseFolderId>) -> Self {
        Self {
            folder_shape,
            folder_ids,
        }
    }
}

impl Operation for GetFolder {
    type Response = GetFolderResponse;

    const NAME: &'static str = "GetFolder";

    fn validate(&self) -> Result<(), Error> {
        if self.folder_ids.is_empty() {
            return Err(Error::EmptyRequest(Self::NAME));
        }

        Ok(())
    }

    fn write_contents(
        &self,
        writer: &mut EwsXmlWriter,
        version: ExchangeServerVersion,
    ) -> Result<(), Error> {
        self.folder_shape.write_folder_shape(writer, version)?;

        writer.write_element_with(
            XmlNamespace::Messages,
            "FolderIds",
            NO_ATTRIBUTES,
            |writer| self.folder_ids.iter().try_for_each(|id| id.write(writer)),
        )
    }

    fn load_response(&self, response: &XmlElement) -> Result<Self::Response, Error> {
        let messages = ResponseMessages::load(response, |message| {
            let mut loaded = FoldersResponseMessage::from_element(message)?;
            for folder in &mut loaded.folders {
                let requested = self
                    .folder_shape
                    .requested_definitions(folder.property_bag().schema());
                folder.property_bag_mut().mark_requested(requested);
            }

            Ok(loaded)
        })?;
        messages.check_count(Self::NAME, self.folder_ids.len());

        Ok(messages)
    }
}
