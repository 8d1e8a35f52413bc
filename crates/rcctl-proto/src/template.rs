//! Remote Config template document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::version::{Version, VersionNumber};

/// A versioned configuration snapshot as returned by the service.
///
/// rcctl only reads `version`; everything else is carried through as-is, so a
/// template serializes back to the document it was parsed from. Collections
/// are optional to keep an empty `conditions: []` distinct from an absent one,
/// and every level keeps unknown fields in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, RemoteConfigParameter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_groups: Option<BTreeMap<String, ParameterGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigTemplate {
    /// The snapshot's version number, if the service reported one.
    pub fn version_number(&self) -> Option<VersionNumber> {
        self.version.as_ref().and_then(|v| v.version_number)
    }

    /// The version a rollback targeted, present on rollback results.
    pub fn rollback_source(&self) -> Option<VersionNumber> {
        self.version.as_ref().and_then(|v| v.rollback_source)
    }
}

/// A named predicate that selects conditional parameter values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub name: String,
    pub expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteConfigParameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ParameterValue>,
    /// Keyed by condition name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_values: Option<BTreeMap<String, ParameterValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Either an explicit value or a marker deferring to the in-app default.
///
/// Other value kinds (personalization, rollout) stay in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_in_app_default: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, RemoteConfigParameter>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
