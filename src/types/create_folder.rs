/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    types::{
        response::{FoldersResponseMessage, ResponseMessages},
        server_version::ExchangeServerVersion,
    },
    xml::{EwsXmlWriter, XmlElement, XmlNamespace, NO_ATTRIBUTES},
    BaseFolderId, Error, Folder, Operation, OperationResponse, ServiceObject,
};

/// A request to create one or more folders.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/createfolder>
#[derive(Clone, Debug)]
pub struct CreateFolder {
    /// The folder the new folders are created in.
    pub parent_folder_id: BaseFolderId,

    pub folders: Vec<Folder>,
}

/// A response to a [`CreateFolder`] request.
pub type CreateFolderResponse = ResponseMessages<FoldersResponseMessage>;

impl CreateFolder {
    pub fn new(parent_folder_id: impl Into<BaseFolderId>, folders: Vec<Folder>) -> Self {
        Self {
            parent_folder_id: parent_folder_id.into(),
            folders,
        }
    }

    /// Updates the folders of this request with the ids the server assigned
    /// them, returning the first failure if any folder was not created.
    pub fn apply_response(&mut self, response: &CreateFolderResponse) -> Result<(), Error> {
        let mut first_error = None;
        for (folder, message) in self.folders.iter_mut().zip(response.response_messages()) {
            match message.as_result() {
                Ok(FoldersResponseMessage { folders }) => {
                    if let Some(returned) = folders.first() {
                        folder.apply_server_response(returned);
                    }
                }
                Err(err) => {
                    log::warn!("failed to create folder: {err}");
                    first_error.get_or_insert_with(|| err.clone());
                }
            }
        }

        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    pub fn into_folders(self) -> Vec<Folder> {
        self.folders
    }
}

impl Operation for CreateFolder {
    type Response = CreateFolderResponse;

    const NAME: &'static str = "CreateFolder";

    fn validate(&self) -> Result<(), Error> {
        if self.folders.is_empty() {
            return Err(Error::EmptyRequest(Self::NAME));
        }

        if self.folders.iter().any(|folder| !folder.is_new()) {
            return Err(Error::ObjectAlreadySaved(Self::NAME));
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
            "ParentFolderId",
            NO_ATTRIBUTES,
            |writer| self.parent_folder_id.write(writer),
        )?;

        writer.write_element_with(XmlNamespace::Messages, "Folders", NO_ATTRIBUTES, |writer| {
            self.folders
                .iter()
                .try_for_each(|folder| folder.write_to_xml(writer, version))
        })
    }

    fn load_response(&self, response: &XmlElement) -> Result<Self::Response, Error> {
        let messages = ResponseMessages::load(response, FoldersResponseMessage::from_element)?;
        messages.check_count(Self::NAME, self.folders.len());

        Ok(messages)
    }
}
