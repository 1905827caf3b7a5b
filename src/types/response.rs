/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Response messages shared by every operation.

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::{xml::XmlElement, Error, Folder, Item, MessageXml};

/// The outcome of one entry of a request, e.g. one item of a `GetItem`.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/responsemessages>
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseClass<M> {
    Success(M),

    /// The request succeeded with a caveat. The payload is whatever the
    /// server sent along.
    Warning(M),

    Error(ResponseError),
}

impl<M> ResponseClass<M> {
    /// Turns the message into a `Result`, treating warnings as success.
    pub fn into_result(self) -> Result<M, ResponseError> {
        match self {
            ResponseClass::Success(message) | ResponseClass::Warning(message) => Ok(message),
            ResponseClass::Error(error) => Err(error),
        }
    }

    pub fn as_result(&self) -> Result<&M, &ResponseError> {
        match self {
            ResponseClass::Success(message) | ResponseClass::Warning(message) => Ok(message),
            ResponseClass::Error(error) => Err(error),
        }
    }

    fn load<F>(element: &XmlElement, load_message: &mut F) -> Result<Self, Error>
    where
        F: FnMut(&XmlElement) -> Result<M, Error>,
    {
        match element.required_attribute("ResponseClass")? {
            "Success" => Ok(ResponseClass::Success(load_message(element)?)),
            "Warning" => {
                log::warn!(
                    "response message `{}` returned warning: {}",
                    element.name(),
                    element.child_text("MessageText").unwrap_or_default()
                );
                Ok(ResponseClass::Warning(load_message(element)?))
            }
            "Error" => Ok(ResponseClass::Error(ResponseError::from_element(element)?)),
            other => Err(Error::UnexpectedResponse(format!(
                "unknown response class `{other}` in `{}`",
                element.name()
            ))),
        }
    }
}

/// An error returned by the server for one entry of a request.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
#[error("{response_code}: {message_text}")]
pub struct ResponseError {
    /// A human-readable description of the error.
    pub message_text: String,

    pub response_code: ResponseCode,

    /// Error-specific details, such as how long to back off for.
    pub message_xml: Option<MessageXml>,
}

impl ResponseError {
    fn from_element(element: &XmlElement) -> Result<Self, Error> {
        Ok(Self {
            message_text: element
                .child_text("MessageText")
                .unwrap_or_default()
                .to_owned(),
            response_code: element
                .child_text("ResponseCode")
                .map(|code| ResponseCode::from(code.trim()))
                .ok_or_else(|| {
                    Error::UnexpectedResponse(format!(
                        "error message `{}` without a response code",
                        element.name()
                    ))
                })?,
            message_xml: element
                .child("MessageXml")
                .map(MessageXml::from_element)
                .transpose()?,
        })
    }
}

/// The response messages of an operation, one per entry of the request, in
/// request order.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseMessages<M> {
    pub response_messages: Vec<ResponseClass<M>>,
}

impl<M> ResponseMessages<M> {
    /// Reads the `ResponseMessages` element below an operation response,
    /// loading the payload of successful messages with `load_message`.
    pub(crate) fn load<F>(response: &XmlElement, mut load_message: F) -> Result<Self, Error>
    where
        F: FnMut(&XmlElement) -> Result<M, Error>,
    {
        let response_messages = response
            .required_child("ResponseMessages")?
            .children()
            .map(|message| ResponseClass::load(message, &mut load_message))
            .collect::<Result<_, _>>()?;

        Ok(Self { response_messages })
    }

    /// Logs a warning when the server did not answer every entry of a
    /// request exactly once.
    pub(crate) fn check_count(&self, operation: &str, expected: usize) {
        let count = self.response_messages.len();
        if count != expected {
            log::warn!(
                "{operation} request had {expected} entries, but the response has {count} messages"
            );
        }
    }
}

/// The payload of a response message listing items, as returned by
/// `CreateItem` and `GetItem`.
#[derive(Clone, Debug)]
pub struct ItemsResponseMessage {
    pub items: Vec<Item>,
}

impl ItemsResponseMessage {
    pub(crate) fn from_element(message: &XmlElement) -> Result<Self, Error> {
        Ok(Self {
            items: load_items(message)?,
        })
    }
}

/// The payload of an `UpdateItem` response message.
#[derive(Clone, Debug)]
pub struct UpdateItemResponseMessage {
    /// The server's copy of the updated item, usually only its new id.
    pub items: Vec<Item>,

    /// How many conflicts the server resolved while applying the update.
    pub conflict_count: Option<u32>,
}

impl UpdateItemResponseMessage {
    pub(crate) fn from_element(message: &XmlElement) -> Result<Self, Error> {
        let conflict_count = match message.child("ConflictResults") {
            Some(results) => results.parse_child("Count")?,
            None => None,
        };

        Ok(Self {
            items: load_items(message)?,
            conflict_count,
        })
    }
}

/// The payload of a response message listing folders, as returned by
/// `CreateFolder`, `GetFolder` and `UpdateFolder`.
#[derive(Clone, Debug)]
pub struct FoldersResponseMessage {
    pub folders: Vec<Folder>,
}

impl FoldersResponseMessage {
    pub(crate) fn from_element(message: &XmlElement) -> Result<Self, Error> {
        let folders = match message.child("Folders") {
            Some(folders) => folders
                .children()
                .map(Folder::from_element)
                .collect::<Result<_, _>>()?,
            None => Vec::new(),
        };

        Ok(Self { folders })
    }
}

fn load_items(message: &XmlElement) -> Result<Vec<Item>, Error> {
    match message.child("Items") {
        Some(items) => items.children().map(Item::from_element).collect(),
        None => Ok(Vec::new()),
    }
}

macro_rules! response_codes {
    ($($code:ident),* $(,)?) => {
        /// A status code returned by EWS, either for a response message or in
        /// the detail of a SOAP fault.
        ///
        /// Codes this crate does not list are kept in `Other`.
        ///
        /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/responsecode>
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum ResponseCode {
            $($code,)*
            Other(String),
        }

        impl ResponseCode {
            pub fn as_str(&self) -> &str {
                match self {
                    $(ResponseCode::$code => stringify!($code),)*
                    ResponseCode::Other(code) => code,
                }
            }
        }

        impl From<&str> for ResponseCode {
            fn from(value: &str) -> Self {
                match value {
                    $(stringify!($code) => ResponseCode::$code,)*
                    other => ResponseCode::Other(other.to_owned()),
                }
            }
        }
    };
}

response_codes! {
    NoError,
    ErrorAccessDenied,
    ErrorChangeKeyRequired,
    ErrorChangeKeyRequiredForWriteOperations,
    ErrorConnectionFailed,
    ErrorCorruptData,
    ErrorExceededConnectionCount,
    ErrorFolderExists,
    ErrorFolderNotFound,
    ErrorIncorrectUpdatePropertyCount,
    ErrorInternalServerError,
    ErrorInvalidChangeKey,
    ErrorInvalidId,
    ErrorInvalidIdMalformed,
    ErrorInvalidPropertyRequest,
    ErrorInvalidPropertySet,
    ErrorInvalidServerVersion,
    ErrorIrresolvableConflict,
    ErrorItemNotFound,
    ErrorMailboxStoreUnavailable,
    ErrorNameResolutionMultipleResults,
    ErrorObjectTypeChanged,
    ErrorQuotaExceeded,
    ErrorSchemaValidation,
    ErrorServerBusy,
    ErrorStaleObject,
    ErrorTimeoutExpired,
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResponseCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Ok(ResponseCode::from(code.trim()))
    }
}
