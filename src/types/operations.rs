/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{
    types::{
        response::{ResponseClass, ResponseMessages},
        server_version::ExchangeServerVersion,
    },
    xml::{EwsXmlWriter, XmlElement},
    Error,
};

/// A request which can be sent as the body of an EWS SOAP envelope.
pub trait Operation {
    /// The structured response to this request.
    type Response: OperationResponse;

    /// The local name of the request element, e.g. `GetItem`. The response
    /// element is named the same with a `Response` suffix.
    const NAME: &'static str;

    /// Attributes of the request element.
    fn attributes(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Checks that the request can be sent.
    fn validate(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Writes the children of the request element.
    fn write_contents(
        &self,
        writer: &mut EwsXmlWriter,
        version: ExchangeServerVersion,
    ) -> Result<(), Error>;

    /// Reads the response from the `{NAME}Response` element.
    fn load_response(&self, response: &XmlElement) -> Result<Self::Response, Error>;
}

/// A response to an [`Operation`], made of one message per entry of the
/// request.
pub trait OperationResponse {
    type Message;

    fn response_messages(&self) -> &[ResponseClass<Self::Message>];

    fn into_response_messages(self) -> Vec<ResponseClass<Self::Message>>;
}

impl<M> OperationResponse for ResponseMessages<M> {
    type Message = M;

    fn response_messages(&self) -> &[ResponseClass<M>] {
        &self.response_messages
    }

    fn into_response_messages(self) -> Vec<ResponseClass<M>> {
        self.response_messages
    }
}
