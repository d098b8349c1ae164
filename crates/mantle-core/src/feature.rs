//! Feature entitlements and local evaluation.
//!
//! Features arrive on the customer record as a map from feature key to
//! [`Feature`]. Evaluation is entirely local: given an already-fetched map
//! and (for limit features) a current count, decide whether the entitlement
//! permits the action. No network calls happen here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Sentinel limit value meaning "unlimited" on a `limit` feature.
pub const UNLIMITED: i64 = -1;

/// Sentinel returned by [`feature_limit`] when no limit information exists.
pub const NO_LIMIT: i64 = -1;

/// The kind of entitlement a feature grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    /// On/off entitlement; `value` is a boolean.
    Boolean,
    /// Numeric cap; `value` is the maximum count, `-1` meaning unlimited.
    Limit,
    /// Numeric cap that may be exceeded with overage billing.
    LimitWithOverage,
    /// A type this client version does not know about.
    #[serde(other)]
    Unknown,
}

/// A feature entitlement attached to a plan or subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Feature identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Entitlement kind.
    #[serde(rename = "type")]
    pub feature_type: FeatureType,

    /// The entitlement value: a boolean for `boolean` features, a number
    /// for `limit` features. Kept as raw JSON since the shape depends on
    /// the type.
    #[serde(default)]
    pub value: serde_json::Value,

    /// Display order within the plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
}

/// Decide whether a named feature permits an action.
///
/// Rules:
/// - `boolean`: enabled iff `value` is truthy.
/// - `limit`: enabled iff `count < value`, or `value == -1` (unlimited).
///   A missing or non-numeric value is not enabled.
/// - Any other type, or a missing feature key: not enabled.
#[must_use]
pub fn feature_enabled(features: &HashMap<String, Feature>, key: &str, count: i64) -> bool {
    let Some(feature) = features.get(key) else {
        return false;
    };
    match feature.feature_type {
        FeatureType::Boolean => is_truthy(&feature.value),
        FeatureType::Limit => match feature.value.as_i64() {
            Some(limit) => limit == UNLIMITED || count < limit,
            None => false,
        },
        FeatureType::LimitWithOverage | FeatureType::Unknown => false,
    }
}

/// The numeric cap for a named feature.
///
/// Returns the raw value only when the feature exists and its type is
/// exactly `limit`; otherwise [`NO_LIMIT`]. Note `-1` is also a valid
/// `limit` value meaning unlimited, so a `-1` return is not on its own
/// proof the feature is absent.
#[must_use]
pub fn feature_limit(features: &HashMap<String, Feature>, key: &str) -> i64 {
    match features.get(key) {
        Some(feature) if feature.feature_type == FeatureType::Limit => {
            feature.value.as_i64().unwrap_or(NO_LIMIT)
        }
        _ => NO_LIMIT,
    }
}

/// JSON truthiness: `null`, `false`, `0`, and `""` are falsy; everything
/// else (including empty arrays and objects) is truthy.
fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}
