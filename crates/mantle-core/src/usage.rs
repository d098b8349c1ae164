//! Usage events and metrics.
//!
//! Usage events are application-emitted signals used for metered billing
//! and analytics. They are constructed by the caller, sent once, and never
//! retried automatically.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A usage event to report to the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvent {
    /// Optional idempotency key. Events sharing an id are deduplicated
    /// server-side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,

    /// The event name the usage metric is keyed to.
    pub event_name: String,

    /// The customer the usage belongs to. Required only when not
    /// authenticating with a customer API token, which already scopes the
    /// call to one customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    /// Application-defined event properties.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, serde_json::Value>,

    /// When the usage occurred; absent means server receive time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl UsageEvent {
    /// Create an event with just a name; everything else defaults.
    #[must_use]
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_id: None,
            event_name: event_name.into(),
            customer_id: None,
            properties: HashMap::new(),
            timestamp: None,
        }
    }

    /// Set the idempotency key.
    #[must_use]
    pub fn with_event_id(mut self, event_id: impl Into<String>) -> Self {
        self.event_id = Some(event_id.into());
        self
    }

    /// Set the customer the usage belongs to.
    #[must_use]
    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    /// Add an event property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }
}

/// A usage metric attached to a customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetric {
    /// Metric identifier.
    pub id: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The event name the metric aggregates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,

    /// Current value for the active period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_sets_fields() {
        let event = UsageEvent::new("page_view")
            .with_event_id("evt_1")
            .with_customer_id("cust_1")
            .with_property("path", json!("/pricing"));
        assert_eq!(event.event_id.as_deref(), Some("evt_1"));
        assert_eq!(event.properties["path"], json!("/pricing"));
    }

    #[test]
    fn serializes_camel_case_and_omits_empty() {
        let event = UsageEvent::new("page_view");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value, json!({"eventName": "page_view"}));
    }
}
