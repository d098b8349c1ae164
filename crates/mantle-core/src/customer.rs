//! Customer records.
//!
//! The customer is the authenticated end-user of the embedding application.
//! It is fetched on demand and never cached locally; the server is the
//! source of truth for billing status, plans, and entitlements.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feature::Feature;
use crate::plan::Plan;
use crate::subscription::Subscription;

/// The customer's standing with the billing provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingStatus {
    /// In good standing.
    Active,
    /// Trial period in progress.
    Trialing,
    /// Payment collection has failed at least once.
    PastDue,
    /// Subscription cancelled.
    Cancelled,
    /// Payment frozen (e.g. store closed).
    Frozen,
    /// No subscription on record.
    None,
    /// A status this client version does not know about.
    #[serde(other)]
    Unknown,
}

/// A postal address attached to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// First street line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    /// Second street line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Province or state code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_code: Option<String>,
    /// ISO country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// An end-customer record as returned by the `customer` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Mantle's identifier for this customer.
    pub id: String,

    /// Whether this is a test (non-billable) customer.
    #[serde(default)]
    pub test: bool,

    /// Customer name, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Contact email, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Standing with the billing provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_status: Option<BillingStatus>,

    /// Plans this customer may subscribe to.
    #[serde(default)]
    pub plans: Vec<Plan>,

    /// The current subscription, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,

    /// Feature entitlements keyed by feature key.
    #[serde(default)]
    pub features: HashMap<String, Feature>,

    /// Current usage keyed by usage metric id.
    #[serde(default)]
    pub usage: HashMap<String, serde_json::Value>,

    /// Application-defined fields set via identify.
    #[serde(default)]
    pub custom_fields: HashMap<String, serde_json::Value>,

    /// Preferred billing address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_address: Option<Address>,

    /// When the app was installed for this customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_at: Option<DateTime<Utc>>,

    /// When the current trial started, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_starts_at: Option<DateTime<Utc>>,

    /// When the current trial ends, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_expires_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Check whether a named feature permits an action at the given count.
    ///
    /// Purely local; see [`crate::feature::feature_enabled`] for the rules.
    #[must_use]
    pub fn feature_enabled(&self, key: &str, count: i64) -> bool {
        crate::feature::feature_enabled(&self.features, key, count)
    }

    /// The numeric cap for a named `limit` feature, or `-1` when no limit
    /// information exists.
    #[must_use]
    pub fn feature_limit(&self, key: &str) -> i64 {
        crate::feature::feature_limit(&self.features, key)
    }
}
