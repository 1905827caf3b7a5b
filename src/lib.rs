/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! A schema-driven object model for Exchange Web Services.
//!
//! Items and folders keep their values in a [`PropertyBag`] keyed by static
//! [`PropertyDefinition`]s. The bag remembers which properties were added,
//! modified or deleted since the object was last loaded, so that the same
//! object can be written either as a full snapshot (`CreateItem`,
//! `CreateFolder`) or as a minimal set of field updates (`UpdateItem`,
//! `UpdateFolder`).
//!
//! This crate only produces and consumes XML documents; sending them to a
//! server is left to the caller.

use thiserror::Error;

#[macro_use]
mod macros;

pub mod complex;
mod context;
pub mod objects;
pub mod property;
pub mod types;
pub mod xml;

#[cfg(test)]
mod test_utils;

pub use context::*;
pub use objects::*;
pub use property::{
    PropertyBag, PropertyDefinition, PropertyFlags, PropertyKind, PropertyValue,
    PropertyValueType, ServiceObjectSchema,
};
pub use types::*;

pub(crate) const SOAP_NS_URI: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub(crate) const TYPES_NS_URI: &str = "http://schemas.microsoft.com/exchange/services/2006/types";
pub(crate) const MESSAGES_NS_URI: &str =
    "http://schemas.microsoft.com/exchange/services/2006/messages";
pub(crate) const ERRORS_NS_URI: &str = "http://schemas.microsoft.com/exchange/services/2006/errors";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("error manipulating XML data")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to write XML document")]
    Io(#[from] std::io::Error),

    #[error("failed to deserialize structure from XML")]
    Deserialize(#[from] serde_path_to_error::Error<quick_xml::DeError>),

    #[error("failed to format date/time value")]
    DateTimeFormat(#[from] time::error::Format),

    #[error("failed to parse date/time value")]
    DateTimeParse(#[from] time::error::Parse),

    #[error("a request encountered a SOAP fault: {0:?}")]
    RequestFault(Box<types::soap::Fault>),

    #[error(transparent)]
    ResponseError(#[from] types::response::ResponseError),

    #[error("the response document did not have the expected structure: {0}")]
    UnexpectedResponse(String),

    #[error("unknown Exchange server version `{0}`")]
    UnknownServerVersion(String),

    #[error("property `{0}` must be loaded or assigned before its value can be read")]
    PropertyNotLoaded(&'static str),

    #[error("property `{0}` cannot be set")]
    ReadOnlyProperty(&'static str),

    #[error("property `{0}` cannot be updated")]
    PropertyNotUpdatable(&'static str),

    #[error("property `{0}` cannot be deleted")]
    PropertyNotDeletable(&'static str),

    #[error("property `{property}` is not part of the {schema} schema")]
    PropertyNotInSchema {
        property: &'static str,
        schema: &'static str,
    },

    #[error("value for property `{0}` has the wrong type")]
    PropertyTypeMismatch(&'static str),

    #[error("property `{property}` requires {required} or later, but requests target {requested}")]
    PropertyVersion {
        property: &'static str,
        required: types::server_version::ExchangeServerVersion,
        requested: types::server_version::ExchangeServerVersion,
    },

    #[error("invalid value `{value}` for {kind}")]
    InvalidValue { kind: &'static str, value: String },

    #[error("invalid service configuration: {0}")]
    Config(String),

    #[error("{0} requires objects that have been saved to the server")]
    ObjectWithoutId(&'static str),

    #[error("{0} requires objects that have not yet been saved to the server")]
    ObjectAlreadySaved(&'static str),

    #[error("{0} request contains nothing to send")]
    EmptyRequest(&'static str),
}
