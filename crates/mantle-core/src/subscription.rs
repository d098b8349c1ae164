//! Subscription records.
//!
//! Subscriptions are created, updated, and cancelled server-side; the
//! client only requests transitions. The `confirmation_url` and
//! `client_secret` fields drive out-of-band payment confirmation flows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::Plan;

/// A discount applied to an active subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    /// Discount identifier.
    pub id: String,

    /// Price per interval after the discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_amount: Option<f64>,

    /// When the discount stops applying, if limited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_ends_at: Option<DateTime<Utc>>,
}

/// One plan line on a multi-plan subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionLineItem {
    /// Line identifier.
    pub id: String,

    /// The plan this line bills for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,

    /// Line amount per interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// A customer's billing arrangement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Mantle's identifier for this subscription.
    pub id: String,

    /// The primary plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,

    /// Per-plan lines for multi-plan subscriptions.
    #[serde(default)]
    pub line_items: Vec<SubscriptionLineItem>,

    /// Whether the subscription is currently active.
    #[serde(default)]
    pub active: bool,

    /// Recurring total per interval, after discounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,

    /// Recurring subtotal per interval, before discounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,

    /// Cap across metered charges, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_charge_capped_amount: Option<f64>,

    /// Discounts currently applied.
    #[serde(default)]
    pub applied_discounts: Vec<AppliedDiscount>,

    /// When the subscription became active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activated_at: Option<DateTime<Utc>>,

    /// When the subscription was cancelled, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,

    /// When billing froze (e.g. store closed), if it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frozen_at: Option<DateTime<Utc>>,

    /// Start of the current billing period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_period_start: Option<DateTime<Utc>>,

    /// End of the current billing period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_period_end: Option<DateTime<Utc>>,

    /// When the trial started, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_starts_at: Option<DateTime<Utc>>,

    /// When the trial ends, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_expires_at: Option<DateTime<Utc>>,

    /// URL the customer must visit to confirm the subscription, when the
    /// billing provider requires an approval step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_url: Option<String>,

    /// Payment-provider client secret for confirming payment out of band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}
