//! Template version metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a historical template snapshot.
///
/// The service encodes version numbers as int64-in-a-string (`"115"`).
/// Deserialization accepts either a string or a bare number; serialization
/// always emits the string form. No range checks are applied: zero or
/// negative values are passed to the service as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionNumber(i64);

impl VersionNumber {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The version immediately before this one.
    ///
    /// Assumes the history is contiguous: no gap or branch handling.
    pub const fn previous(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl From<i64> for VersionNumber {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a version number string is not an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version number '{input}': expected an integer")]
pub struct ParseVersionNumberError {
    input: String,
}

impl FromStr for VersionNumber {
    type Err = ParseVersionNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ParseVersionNumberError {
                input: s.to_string(),
            })
    }
}

impl Serialize for VersionNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for VersionNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Ok(Self(n)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// The account that published a template version.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Version metadata attached to every template.
///
/// Fields the service adds later are kept in `extra` so a version survives a
/// deserialize/serialize cycle unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_number: Option<VersionNumber>,
    /// RFC 3339 timestamp, kept verbatim; see [`Version::updated_at`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_user: Option<UpdateUser>,
    /// `CONSOLE`, `REST_API`, `ADMIN_SDK_NODE`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_origin: Option<String>,
    /// `INCREMENTAL_UPDATE`, `FORCED_UPDATE`, `ROLLBACK`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Set on versions created by a rollback: the version rolled back to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollback_source: Option<VersionNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_legacy: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Version {
    /// `update_time` parsed as a UTC timestamp. `None` if absent or malformed.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.update_time
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc))
    }
}

/// One page of the `listVersions` response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListVersionsResult {
    #[serde(default)]
    pub versions: Vec<Version>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
