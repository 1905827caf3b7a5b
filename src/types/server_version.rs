/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::Error;

/// The Exchange Server version identifiers allowed in `RequestServerVersion`
/// headers.
///
/// Versions are ordered, so that a property introduced in a given version can
/// be checked against the version a request targets.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/requestserverversion#version-attribute-values>
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExchangeServerVersion {
    Exchange2007,
    Exchange2007_SP1,
    Exchange2010,
    Exchange2010_SP1,
    Exchange2010_SP2,
    Exchange2013,
    Exchange2013_SP1,
    Exchange2015,
    Exchange2016,
}

impl ExchangeServerVersion {
    /// The most recent version known to this crate.
    pub const LATEST: ExchangeServerVersion = ExchangeServerVersion::Exchange2016;

    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeServerVersion::Exchange2007 => "Exchange2007",
            ExchangeServerVersion::Exchange2007_SP1 => "Exchange2007_SP1",
            ExchangeServerVersion::Exchange2010 => "Exchange2010",
            ExchangeServerVersion::Exchange2010_SP1 => "Exchange2010_SP1",
            ExchangeServerVersion::Exchange2010_SP2 => "Exchange2010_SP2",
            ExchangeServerVersion::Exchange2013 => "Exchange2013",
            ExchangeServerVersion::Exchange2013_SP1 => "Exchange2013_SP1",
            ExchangeServerVersion::Exchange2015 => "Exchange2015",
            ExchangeServerVersion::Exchange2016 => "Exchange2016",
        }
    }
}

/// Parses the provided string into a known version identifier.
impl TryFrom<&str> for ExchangeServerVersion {
    /// If the provided string could not be turned into a known version
    /// identifier, [`Error::UnknownServerVersion`] is returned.
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Exchange2007" => Ok(ExchangeServerVersion::Exchange2007),
            "Exchange2007_SP1" => Ok(ExchangeServerVersion::Exchange2007_SP1),
            "Exchange2010" => Ok(ExchangeServerVersion::Exchange2010),
            "Exchange2010_SP1" => Ok(ExchangeServerVersion::Exchange2010_SP1),
            "Exchange2010_SP2" => Ok(ExchangeServerVersion::Exchange2010_SP2),
            "Exchange2013" => Ok(ExchangeServerVersion::Exchange2013),
            "Exchange2013_SP1" => Ok(ExchangeServerVersion::Exchange2013_SP1),
            "Exchange2015" => Ok(ExchangeServerVersion::Exchange2015),
            "Exchange2016" => Ok(ExchangeServerVersion::Exchange2016),

            _ => Err(Error::UnknownServerVersion(value.to_owned())),
        }
    }
}

// Consumers persist the version associated with a given server.
impl From<ExchangeServerVersion> for String {
    fn from(value: ExchangeServerVersion) -> Self {
        value.as_str().into()
    }
}

impl fmt::Display for ExchangeServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ExchangeServerVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        ExchangeServerVersion::try_from(value.as_str()).map_err(serde::de::Error::custom)
    }
}

/// The version information of the Exchange Server instance that generated
/// the attached response.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/serverversioninfo>
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ServerVersionInfo {
    #[serde(rename = "@MajorVersion")]
    pub major_version: Option<String>,

    #[serde(rename = "@MinorVersion")]
    pub minor_version: Option<String>,

    #[serde(rename = "@MajorBuildNumber")]
    pub major_build_number: Option<String>,

    #[serde(rename = "@MinorBuildNumber")]
    pub minor_build_number: Option<String>,

    #[serde(rename = "@Version")]
    pub version: Option<String>,
}

impl ServerVersionInfo {
    /// The schema version the server reports, if it is one this crate knows.
    pub fn server_version(&self) -> Option<ExchangeServerVersion> {
        self.version
            .as_deref()
            .and_then(|version| ExchangeServerVersion::try_from(version).ok())
    }
}
