/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    types::{
        response::{FoldersResponseMessage, ResponseMessages},
        server_version::ExchangeServerVersion,
    },
    xml::{EwsXmlWriter, XmlElement, XmlNamespace, NO_ATTRIBUTES},
    Error, Folder, Operation, OperationResponse, ServiceObject,
};

/// A request to update properties of one or more folders.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/updatefolder>
#[derive(Clone, Debug)]
pub struct UpdateFolder {
    folders: Vec<Folder>,
}

/// A response to an [`UpdateFolder`] request.
pub type UpdateFolderResponse = ResponseMessages<FoldersResponseMessage>;

impl UpdateFolder {
    /// Creates a request updating `folders`, leaving out those without
    /// changes.
    pub fn new(folders: impl IntoIterator<Item = Folder>) -> Self {
        let folders = folders
            .into_iter()
            .filter(|folder| {
                let dirty = folder.is_dirty();
                if !dirty {
                    log::debug!("leaving unchanged {} out of UpdateFolder", folder.kind());
                }
                dirty
            })
            .collect();

        Self { folders }
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// Updates the folders of this request with their new change keys,
    /// returning the first failure if any folder was not updated.
    pub fn apply_response(&mut self, response: &UpdateFolderResponse) -> Result<(), Error> {
        let mut first_error = None;
        for (folder, message) in self.folders.iter_mut().zip(response.response_messages()) {
            match message.as_result() {
                Ok(FoldersResponseMessage { folders }) => match folders.first() {
                    Some(returned) => folder.apply_server_response(returned),
                    None => folder.property_bag_mut().clear_change_log(),
                },
                Err(err) => {
                    log::warn!("failed to update folder: {err}");
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

impl Operation for UpdateFolder {
    type Response = UpdateFolderResponse;

    const NAME: &'static str = "UpdateFolder";

    fn validate(&self) -> Result<(), Error> {
        if self.folders.is_empty() {
            return Err(Error::EmptyRequest(Self::NAME));
        }

        if self.folders.iter().any(|folder| folder.is_new()) {
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
            "FolderChanges",
            NO_ATTRIBUTES,
            |writer| {
                self.folders.iter().try_for_each(|folder| {
                    let id = folder.id()?.ok_or(Error::ObjectWithoutId(Self::NAME))?;

                    writer.write_element_with(
                        XmlNamespace::Types,
                        "FolderChange",
                        NO_ATTRIBUTES,
                        |writer| {
                            id.write(writer)?;
                            writer.write_element_with(
                                XmlNamespace::Types,
                                "Updates",
                                NO_ATTRIBUTES,
                                |writer| folder.write_updates_to_xml(writer, version),
                            )
                        },
                    )
                })
            },
        )
    }

    fn load_response(&self, response: &XmlElement) -> Result<Self::Response, Error> {
        let messages = ResponseMessages::load(response, FoldersResponseMessage::from_element)?;
        messages.check_count(Self::NAME, self.folders.len());

        Ok(messages)
    }
}
