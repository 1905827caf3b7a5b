/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use serde::Deserialize;

use crate::{types::server_version::ExchangeServerVersion, Error};

text_enum! {
    /// The precision of date/time values returned by the server.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/datetimeprecision>
    #[derive(Deserialize)]
    pub enum DateTimePrecision {
        Seconds,
        Milliseconds,
    }
}

/// Settings shared by every request sent to one service endpoint.
///
/// The context is read from the caller's configuration with serde, e.g.
///
/// ```json
/// { "requested_server_version": "Exchange2010_SP2", "impersonated_user": "alice@example.com" }
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceContext {
    /// The schema version requests target. Properties introduced in later
    /// versions are refused when writing requests.
    pub requested_server_version: ExchangeServerVersion,

    /// Requested precision for date/time values in responses.
    pub date_time_precision: Option<DateTimePrecision>,

    /// The primary SMTP address of a user to act on behalf of.
    pub impersonated_user: Option<String>,

    /// Whether request and response documents are logged at trace level.
    pub trace_enabled: bool,
}

impl Default for ServiceContext {
    fn default() -> Self {
        Self {
            requested_server_version: ExchangeServerVersion::Exchange2013_SP1,
            date_time_precision: None,
            impersonated_user: None,
            trace_enabled: false,
        }
    }
}

impl ServiceContext {
    pub fn new(requested_server_version: ExchangeServerVersion) -> Self {
        Self {
            requested_server_version,
            ..Default::default()
        }
    }

    /// Checks that the settings can be honored by the requested server
    /// version.
    pub fn validate(&self) -> Result<(), Error> {
        if self.date_time_precision.is_some()
            && self.requested_server_version < ExchangeServerVersion::Exchange2010_SP2
        {
            return Err(Error::Config(format!(
                "DateTimePrecision requires Exchange2010_SP2 or later, but requests target {}",
                self.requested_server_version
            )));
        }

        if let Some(user) = &self.impersonated_user {
            if user.trim().is_empty() {
                return Err(Error::Config(
                    "impersonated user must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let context: ServiceContext =
            serde_json::from_str(r#"{ "impersonated_user": "alice@example.com" }"#).unwrap();

        assert_eq!(
            context,
            ServiceContext {
                impersonated_user: Some("alice@example.com".into()),
                ..Default::default()
            }
        );
        assert_eq!(
            context.requested_server_version,
            ExchangeServerVersion::Exchange2013_SP1
        );
        context.validate().unwrap();
    }

    #[test]
    fn reads_all_fields() {
        let context: ServiceContext = serde_json::from_str(
            r#"{
                "requested_server_version": "Exchange2010_SP2",
                "date_time_precision": "Milliseconds",
                "trace_enabled": true
            }"#,
        )
        .unwrap();

        assert_eq!(
            context.requested_server_version,
            ExchangeServerVersion::Exchange2010_SP2
        );
        assert_eq!(
            context.date_time_precision,
            Some(DateTimePrecision::Milliseconds)
        );
        assert!(context.trace_enabled);
        context.validate().unwrap();
    }

    #[test]
    fn rejects_unknown_versions_and_fields() {
        assert!(serde_json::from_str::<ServiceContext>(
            r#"{ "requested_server_version": "Exchange1999" }"#
        )
        .is_err());
        assert!(serde_json::from_str::<ServiceContext>(r#"{ "url": "https://example.com" }"#).is_err());
    }

    #[test]
    fn precision_requires_recent_server() {
        let context = ServiceContext {
            requested_server_version: ExchangeServerVersion::Exchange2010,
            date_time_precision: Some(DateTimePrecision::Seconds),
            ..Default::default()
        };

        assert!(matches!(context.validate(), Err(Error::Config(_))));
    }
}
