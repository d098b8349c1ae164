//! Plan records.
//!
//! Plans are read-only offerings embedded in customer and subscription
//! responses; this library never constructs or mutates them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feature::Feature;

/// Billing interval for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanInterval {
    /// Billed every 30 days.
    ///
    /// Renamed by hand: `rename_all` would render this `EVERY30_DAYS`,
    /// but the wire value is `EVERY_30_DAYS`.
    #[serde(rename = "EVERY_30_DAYS")]
    Every30Days,
    /// Billed annually.
    Annual,
    /// An interval this client version does not know about.
    #[serde(other)]
    Unknown,
}

/// A metered charge attached to a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCharge {
    /// Charge identifier.
    pub id: String,

    /// Price per unit or per interval, in the plan currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    /// Charge model (e.g. `unit`, `unit_limits`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub charge_type: Option<String>,

    /// Customer-facing terms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,

    /// Maximum charge per billing period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capped_amount: Option<f64>,

    /// The usage metric this charge is keyed to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_id: Option<String>,
}

/// A discount that may be applied to a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    /// Discount identifier.
    pub id: String,

    /// Flat amount off, in the plan currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    /// Percentage off (0–100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,

    /// Number of billing intervals the discount lasts; absent means forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_limit_in_intervals: Option<i64>,

    /// Plan price after the discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_amount: Option<f64>,
}

/// A purchasable offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Mantle's identifier for this plan.
    pub id: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// ISO currency code for `amount`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,

    /// Recurring price per interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    /// Whether the plan is publicly listed.
    #[serde(default)]
    pub public: bool,

    /// Whether the plan is currently visible to this customer.
    #[serde(default)]
    pub visible: bool,

    /// Whether the plan may be subscribed to by this customer.
    #[serde(default)]
    pub eligible: bool,

    /// Free-trial length in days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_days: Option<i64>,

    /// Billing interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<PlanInterval>,

    /// Feature entitlements keyed by feature key.
    #[serde(default)]
    pub features: HashMap<String, Feature>,

    /// Metered charges on this plan.
    #[serde(default)]
    pub usage_charges: Vec<UsageCharge>,

    /// Discounts available on this plan.
    #[serde(default)]
    pub discounts: Vec<Discount>,

    /// Whether customers on this plan auto-upgrade when it is replaced.
    #[serde(default)]
    pub auto_upgrade: bool,

    /// When the plan was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the plan was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_plan_with_features() {
        let plan: Plan = serde_json::from_value(json!({
            "id": "plan_1",
            "name": "Pro",
            "currencyCode": "USD",
            "amount": 29.0,
            "interval": "EVERY_30_DAYS",
            "features": {
                "api_access": {"type": "boolean", "value": true}
            },
            "usageCharges": [
                {"id": "uc_1", "type": "unit", "amount": 0.05}
            ]
        }))
        .unwrap();
        assert_eq!(plan.interval, Some(PlanInterval::Every30Days));
        assert_eq!(plan.usage_charges.len(), 1);
        assert!(plan.features.contains_key("api_access"));
    }

    #[test]
    fn interval_wire_names_round_trip() {
        assert_eq!(
            serde_json::to_value(PlanInterval::Every30Days).unwrap(),
            json!("EVERY_30_DAYS")
        );
        assert_eq!(
            serde_json::to_value(PlanInterval::Annual).unwrap(),
            json!("ANNUAL")
        );
        let interval: PlanInterval = serde_json::from_value(json!("EVERY_30_DAYS")).unwrap();
        assert_eq!(interval, PlanInterval::Every30Days);
    }

    #[test]
    fn unknown_interval_tolerated() {
        let plan: Plan = serde_json::from_value(json!({
            "id": "plan_1",
            "interval": "EVERY_90_DAYS"
        }))
        .unwrap();
        assert_eq!(plan.interval, Some(PlanInterval::Unknown));
    }
}
