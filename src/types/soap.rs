/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use serde::Deserialize;

use crate::{
    types::{
        response::ResponseCode,
        server_version::{ExchangeServerVersion, ServerVersionInfo},
    },
    xml::{EwsXmlWriter, XmlElement, XmlNamespace, NO_ATTRIBUTES},
    DateTimePrecision, Error, MessageXml, Operation, ServiceContext,
};

mod de;
use self::de::{DeserializeEnvelope, EnvelopeContent};

/// An element that can be found in the `soap:Header` section of a request or
/// a response.
///
/// See <https://www.w3.org/TR/2000/NOTE-SOAP-20000508/#_Toc478383497>
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Header {
    /// The schema version targeted by the attached request.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/requestserverversion>
    RequestServerVersion { version: ExchangeServerVersion },

    /// The user the request is made on behalf of.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/exchangeimpersonation>
    ExchangeImpersonation { primary_smtp_address: String },

    /// The precision of date/time values in the response.
    DateTimePrecision(DateTimePrecision),

    /// The version information of the Exchange Server instance that generated
    /// the attached response.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/serverversioninfo>
    ServerVersionInfo(ServerVersionInfo),
}

impl Header {
    fn write(&self, writer: &mut EwsXmlWriter) -> Result<(), Error> {
        match self {
            Header::RequestServerVersion { version } => writer.write_empty_element(
                XmlNamespace::Types,
                "RequestServerVersion",
                [("Version", version.as_str())],
            ),
            Header::ExchangeImpersonation {
                primary_smtp_address,
            } => writer.write_element_with(
                XmlNamespace::Types,
                "ExchangeImpersonation",
                NO_ATTRIBUTES,
                |writer| {
                    writer.write_element_with(
                        XmlNamespace::Types,
                        "ConnectingSID",
                        NO_ATTRIBUTES,
                        |writer| {
                            writer.write_element_value(
                                XmlNamespace::Types,
                                "PrimarySmtpAddress",
                                primary_smtp_address,
                            )
                        },
                    )
                },
            ),
            Header::DateTimePrecision(precision) => writer.write_element_value(
                XmlNamespace::Types,
                "DateTimePrecision",
                precision.as_str(),
            ),
            // Only servers send this header.
            Header::ServerVersionInfo(_) => {
                log::debug!("leaving ServerVersionInfo header out of request");
                Ok(())
            }
        }
    }
}

/// A SOAP envelope containing the body of an EWS operation or response.
///
/// See <https://www.w3.org/TR/2000/NOTE-SOAP-20000508/#_Toc478383494>
#[derive(Clone, Debug)]
pub struct Envelope<B> {
    pub headers: Vec<Header>,
    pub body: B,
    trace_enabled: bool,
}

impl<B> Envelope<B> {
    /// The version the request targets, as given by its
    /// `RequestServerVersion` header.
    pub fn requested_server_version(&self) -> Option<ExchangeServerVersion> {
        self.headers.iter().find_map(|header| match header {
            Header::RequestServerVersion { version } => Some(*version),
            _ => None,
        })
    }

    /// The version information the server sent with a response.
    pub fn server_version_info(&self) -> Option<&ServerVersionInfo> {
        self.headers.iter().find_map(|header| match header {
            Header::ServerVersionInfo(info) => Some(info),
            _ => None,
        })
    }
}

impl<B> Envelope<B>
where
    B: Operation,
{
    /// Wraps a request with the headers `context` asks for.
    pub fn new(body: B, context: &ServiceContext) -> Result<Self, Error> {
        context.validate()?;

        let mut headers = vec![Header::RequestServerVersion {
            version: context.requested_server_version,
        }];
        if let Some(user) = &context.impersonated_user {
            headers.push(Header::ExchangeImpersonation {
                primary_smtp_address: user.clone(),
            });
        }
        if let Some(precision) = context.date_time_precision {
            headers.push(Header::DateTimePrecision(precision));
        }

        Ok(Self {
            headers,
            body,
            trace_enabled: context.trace_enabled,
        })
    }

    /// Serializes the SOAP envelope as a complete XML document.
    pub fn as_xml_document(&self) -> Result<Vec<u8>, Error> {
        self.body.validate()?;

        let version = self
            .requested_server_version()
            .unwrap_or(ServiceContext::default().requested_server_version);

        let mut writer = EwsXmlWriter::new();
        writer.write_declaration()?;
        writer.write_element_with(
            XmlNamespace::Soap,
            "Envelope",
            [
                XmlNamespace::Soap.declaration(),
                XmlNamespace::Types.declaration(),
                XmlNamespace::Messages.declaration(),
            ],
            |writer| {
                writer.write_element_with(XmlNamespace::Soap, "Header", NO_ATTRIBUTES, |writer| {
                    self.headers
                        .iter()
                        .try_for_each(|header| header.write(writer))
                })?;

                writer.write_element_with(XmlNamespace::Soap, "Body", NO_ATTRIBUTES, |writer| {
                    writer.write_element_with(
                        XmlNamespace::Messages,
                        B::NAME,
                        self.body.attributes(),
                        |writer| self.body.write_contents(writer, version),
                    )
                })
            },
        )?;

        let document = writer.into_inner();
        if self.trace_enabled {
            log::trace!(
                "{} request document:\n{}",
                B::NAME,
                String::from_utf8_lossy(&document)
            );
        }

        Ok(document)
    }

    /// Reads the server's answer to this request.
    pub fn parse_response(&self, document: &[u8]) -> Result<Envelope<B::Response>, Error> {
        if self.trace_enabled {
            log::trace!(
                "{} response document:\n{}",
                B::NAME,
                String::from_utf8_lossy(document)
            );
        }

        let mut response = Envelope::from_xml_document(document, &self.body)?;
        response.trace_enabled = self.trace_enabled;

        Ok(response)
    }
}

impl<R> Envelope<R> {
    /// Populates an [`Envelope`] from raw XML, reading the body as the
    /// response to `request`.
    pub fn from_xml_document<B>(document: &[u8], request: &B) -> Result<Self, Error>
    where
        B: Operation<Response = R>,
    {
        let de = &mut quick_xml::de::Deserializer::from_reader(document);

        // `serde_path_to_error` gives us the path within the document where
        // deserialization failed, rather than just the immediate error.
        let envelope: DeserializeEnvelope = serde_path_to_error::deserialize(de)?;

        let expected = format!("{}Response", B::NAME);
        match envelope.body {
            EnvelopeContent::Fault(fault) => return Err(Error::RequestFault(Box::new(fault))),
            EnvelopeContent::Response(name) if name != expected => {
                return Err(Error::UnexpectedResponse(format!(
                    "unknown element `{name}`, expected {expected}"
                )));
            }
            EnvelopeContent::Response(_) => (),
        }

        let root = XmlElement::parse(document)?;
        let response = root.required_child("Body")?.required_child(&expected)?;
        let body = request.load_response(response)?;

        Ok(Envelope {
            headers: envelope
                .header
                .map(|header| header.into_headers())
                .unwrap_or_default(),
            body,
            trace_enabled: false,
        })
    }
}

/// A structured representation of a SOAP fault, indicating an error in an EWS
/// request.
///
/// See <https://www.w3.org/TR/2000/NOTE-SOAP-20000508/#_Toc478383507>
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Fault {
    /// An error code indicating the fault in the original request.
    // `faultcode` is a `QName`, kept here as text since it is only of use
    // for diagnostics.
    pub faultcode: String,

    /// A human-readable description of the error.
    pub faultstring: String,

    /// A URI indicating the SOAP actor responsible for the error.
    pub faultactor: Option<String>,

    /// Clarifying information about EWS-specific errors.
    pub detail: Option<FaultDetail>,
}

/// EWS-specific details regarding a SOAP fault.
///
/// This element is not documented in the EWS reference.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct FaultDetail {
    /// An error code indicating the nature of the issue.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/responsecode>
    pub response_code: Option<ResponseCode>,

    /// A human-readable description of the error.
    pub message: Option<String>,

    /// Error-specific information to aid in understanding or responding to the
    /// error.
    pub message_xml: Option<MessageXml>,
}
