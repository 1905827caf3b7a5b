/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    types::{response::ResponseMessages, server_version::ExchangeServerVersion},
    xml::{EwsXmlWriter, XmlElement, XmlNamespace, NO_ATTRIBUTES},
    BaseFolderId, DeleteType, Error, Operation,
};

/// A request to delete one or more folders.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/deletefolder>
#[derive(Clone, Debug)]
pub struct DeleteFolder {
    /// The method the server will use to perform the deletion.
    pub delete_type: DeleteType,

    pub folder_ids: Vec<BaseFolderId>,
}

/// A response to a [`DeleteFolder`] request.
pub type DeleteFolderResponse = ResponseMessages<()>;

impl Operation for DeleteFolder {
    type Response = DeleteFolderResponse;

    const NAME: &'static str = "DeleteFolder";

    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![("DeleteType", self.delete_type.to_string())]
    }

    fn validate(&self) -> Result<(), Error> {
        if self.folder_ids.is_empty() {
            return Err(Error::EmptyRequest(Self::NAME));
        }

        Ok(())
    }

    fn write_contents(
        &self,
        writer: &mut EwsXmlWriter,
        _version: ExchangeServerVersion,
    ) -> Result<(), Error> {
        writer.write_element_with(
            XmlNamespace::Messages,
            "FolderIds",
            NO_ATTRIBUTES,
            |writer| self.folder_ids.iter().try_for_each(|id| id.write(writer)),
        )
    }

    fn load_response(&self, response: &XmlElement) -> Result<Self::Response, Error> {
        let messages = ResponseMessages::load(response, |_| Ok(()))?;
        messages.check_count(Self::NAME, self.folder_ids.len());

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_utils::{parse_element, write_to_string},
        types::response::{ResponseClass, ResponseCode},
        FolderId,
    };

    #[test]
    fn deletes_folders() {
        let request = DeleteFolder {
            delete_type: DeleteType::SoftDelete,
            folder_ids: vec![FolderId::new("AQMkF5", Some("AQAAAE".to_string())).into()],
        };

        assert_eq!(
            request.attributes(),
            vec![("DeleteType", "SoftDelete".to_string())]
        );
        let written = write_to_string(|writer| {
            request.write_contents(writer, ExchangeServerVersion::Exchange2013_SP1)
        });
        assert_eq!(
            written,
            r#"<m:FolderIds><t:FolderId Id="AQMkF5" ChangeKey="AQAAAE"/></m:FolderIds>"#
        );

        let response = request
            .load_response(&parse_element(concat!(
                "<m:DeleteFolderResponse><m:ResponseMessages>",
                r#"<m:DeleteFolderResponseMessage ResponseClass="Error">"#,
                "<m:MessageText>The specified folder could not be found in the store.</m:MessageText>",
                "<m:ResponseCode>ErrorFolderNotFound</m:ResponseCode>",
                "</m:DeleteFolderResponseMessage>",
                "</m:ResponseMessages></m:DeleteFolderResponse>"
            )))
            .unwrap();

        match &response.response_messages[..] {
            [ResponseClass::Error(err)] => {
                assert_eq!(err.response_code, ResponseCode::ErrorFolderNotFound)
            }
            other => panic!("expected a single error message, got {other:?}"),
        }

        assert!(matches!(
            DeleteFolder {
                delete_type: DeleteType::HardDelete,
                folder_ids: Vec::new(),
            }
            .validate(),
            Err(Error::EmptyRequest("DeleteFolder"))
        ));
    }
}
