//! Request parameters and response envelopes for the Mantle client.
//!
//! Parameter shapes that are mutually exclusive on the wire (`platformId`
//! vs. `myshopifyDomain`, `planId` vs. `planIds`) are modeled as enums so
//! illegal combinations cannot be constructed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mantle_core::{Checklist, Customer, Invoice, Notification, NotificationTemplate};

// ============================================================================
// Identify
// ============================================================================

/// How a Shopify customer is identified: exactly one of the platform's
/// numeric id or the myshopify domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PlatformIdentifier {
    /// Identify by the platform's own id.
    PlatformId {
        /// The platform id.
        #[serde(rename = "platformId")]
        platform_id: String,
    },
    /// Identify by the `*.myshopify.com` domain.
    MyshopifyDomain {
        /// The myshopify domain.
        #[serde(rename = "myshopifyDomain")]
        myshopify_domain: String,
    },
}

impl PlatformIdentifier {
    /// Identify by platform id.
    #[must_use]
    pub fn platform_id(id: impl Into<String>) -> Self {
        Self::PlatformId {
            platform_id: id.into(),
        }
    }

    /// Identify by myshopify domain.
    #[must_use]
    pub fn myshopify_domain(domain: impl Into<String>) -> Self {
        Self::MyshopifyDomain {
            myshopify_domain: domain.into(),
        }
    }
}

/// Parameters for registering or updating a customer record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyParams {
    /// The platform the customer lives on (e.g. `shopify`).
    pub platform: String,

    /// Platform-specific customer identifier.
    #[serde(flatten)]
    pub identifier: PlatformIdentifier,

    /// Platform access token, when the platform requires one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Customer name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Application-defined fields to store on the customer.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub custom_fields: HashMap<String, serde_json::Value>,

    /// Tags to set on the customer.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Backdated install time, for imports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl IdentifyParams {
    /// Parameters for a Shopify customer.
    #[must_use]
    pub fn shopify(identifier: PlatformIdentifier) -> Self {
        Self {
            platform: "shopify".to_string(),
            identifier,
            access_token: None,
            name: None,
            email: None,
            custom_fields: HashMap::new(),
            tags: Vec::new(),
            created_at: None,
        }
    }
}

/// Response to `identify`: the customer-scoped API token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyResponse {
    /// Token safe for browser-side use, scoped to this customer.
    pub api_token: String,
}

// ============================================================================
// Subscriptions
// ============================================================================

/// Which plan(s) to subscribe to: exactly one of a single plan id or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PlanSelection {
    /// Subscribe to one plan.
    Single {
        /// The plan id.
        #[serde(rename = "planId")]
        plan_id: String,
    },
    /// Subscribe to several plans at once.
    Multiple {
        /// The plan ids.
        #[serde(rename = "planIds")]
        plan_ids: Vec<String>,
    },
}

impl PlanSelection {
    /// Select a single plan.
    #[must_use]
    pub fn single(plan_id: impl Into<String>) -> Self {
        Self::Single {
            plan_id: plan_id.into(),
        }
    }

    /// Select several plans.
    #[must_use]
    pub fn multiple(plan_ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Multiple {
            plan_ids: plan_ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parameters for creating a subscription.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeParams {
    /// Plan or plans to subscribe to.
    #[serde(flatten)]
    pub plans: PlanSelection,

    /// Discount to apply, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_id: Option<String>,

    /// Where the billing provider redirects after confirmation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,

    /// Override the billing provider for this subscription.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_provider: Option<String>,

    /// Trial length override in days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_days: Option<i64>,

    /// Whether to use the provider's hosted confirmation page.
    pub hosted: bool,

    /// Whether to charge a previously saved payment method instead of
    /// collecting one.
    pub use_saved_payment_method: bool,
}

impl SubscribeParams {
    /// Subscribe to the given plan selection with default behavior:
    /// hosted confirmation on, saved payment method off.
    #[must_use]
    pub fn new(plans: PlanSelection) -> Self {
        Self {
            plans,
            discount_id: None,
            return_url: None,
            billing_provider: None,
            trial_days: None,
            hosted: true,
            use_saved_payment_method: false,
        }
    }

    /// Set the post-confirmation return URL.
    #[must_use]
    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    /// Set the discount to apply.
    #[must_use]
    pub fn with_discount(mut self, discount_id: impl Into<String>) -> Self {
        self.discount_id = Some(discount_id.into());
        self
    }
}

/// Parameters for cancelling the current subscription.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelSubscriptionParams {
    /// Customer-supplied cancellation reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
}

/// Parameters for updating a subscription's usage cap.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionParams {
    /// The subscription to update.
    pub id: String,

    /// New cap across metered charges.
    pub capped_amount: f64,
}

// ============================================================================
// Payment methods & hosted sessions
// ============================================================================

/// Parameters for starting payment-method collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPaymentMethodParams {
    /// Where to send the customer after collection completes.
    pub return_url: String,
}

/// A setup-intent-like handle for out-of-band payment collection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupIntent {
    /// Intent identifier.
    pub id: String,

    /// Secret the payment provider's frontend library needs to collect the
    /// payment method.
    #[serde(default)]
    pub client_secret: Option<String>,
}

/// Parameters for creating a hosted billing session.
#[derive(Debug, Clone, Serialize)]
pub struct CreateHostedSessionParams {
    /// Which hosted page to open.
    #[serde(rename = "type")]
    pub session_type: String,

    /// Page-specific configuration.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub config: HashMap<String, serde_json::Value>,
}

/// A hosted billing session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedSession {
    /// Session identifier.
    pub id: String,

    /// URL to send the customer to.
    pub url: String,
}

// ============================================================================
// Usage reports & invoices
// ============================================================================

/// Parameters for fetching a usage metric report.
#[derive(Debug, Clone)]
pub struct UsageReportParams {
    /// The usage metric to report on.
    pub usage_metric_id: String,

    /// Report period (e.g. `daily`, `monthly`).
    pub period: Option<String>,

    /// Restrict the report to one customer. Only meaningful with API-key
    /// authentication.
    pub customer_id: Option<String>,
}

impl UsageReportParams {
    /// Report on the given metric with no period or customer filter.
    #[must_use]
    pub fn new(usage_metric_id: impl Into<String>) -> Self {
        Self {
            usage_metric_id: usage_metric_id.into(),
            period: None,
            customer_id: None,
        }
    }
}

/// A usage metric report. The report payload is vendor-shaped and varies by
/// metric, so it is kept as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct UsageMetricReport {
    /// The report payload.
    #[serde(default)]
    pub report: serde_json::Value,
}

/// Parameters for listing invoices.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInvoicesParams {
    /// Zero-based page index.
    pub page: u32,

    /// Page size.
    pub limit: u32,

    /// Restrict to invoices in this status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Default for ListInvoicesParams {
    fn default() -> Self {
        Self {
            page: 0,
            limit: 10,
            status: None,
        }
    }
}

/// Response envelope for `list_invoices`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceList {
    /// The invoices on this page.
    #[serde(default)]
    pub invoices: Vec<Invoice>,

    /// Whether more pages exist.
    #[serde(default)]
    pub has_more: Option<bool>,

    /// Total invoice count, when the server reports it.
    #[serde(default)]
    pub total: Option<u64>,
}

// ============================================================================
// Notifications
// ============================================================================

/// Parameters for marking a notification read and/or dismissed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotificationParams {
    /// The notification to update. Carried in the path, not the body.
    #[serde(skip)]
    pub id: String,

    /// When the customer read the notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime<Utc>>,

    /// When the customer dismissed the notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissed_at: Option<DateTime<Utc>>,
}

/// Response envelope for `list_notifications`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationList {
    /// The customer's notifications.
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// Response envelope for `list_notification_templates`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTemplateList {
    /// The app's notification templates.
    #[serde(default)]
    pub notification_templates: Vec<NotificationTemplate>,
}

// ============================================================================
// Checklists
// ============================================================================

/// Response envelope for `get_checklists`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistList {
    /// The app's checklists with this customer's progress.
    #[serde(default)]
    pub checklists: Vec<Checklist>,
}

// ============================================================================
// Shared envelopes
// ============================================================================

/// Generic acknowledgement returned by fire-and-forget endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Acknowledgement {
    /// Whether the server accepted the request.
    #[serde(default)]
    pub success: bool,
}

/// Wire envelope around a customer record.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CustomerEnvelope {
    pub customer: Customer,
}

/// Wire envelope around a hosted session.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HostedSessionEnvelope {
    pub session: HostedSession,
}

/// Wire envelope around sent notifications.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NotifyEnvelope {
    #[serde(default)]
    pub notifies: Vec<Notification>,
}

/// Wire envelope for bulk usage submission.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct UsageEventsEnvelope<'a> {
    pub events: &'a [mantle_core::UsageEvent],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identify_params_flatten_platform_identifier() {
        let params = IdentifyParams::shopify(PlatformIdentifier::myshopify_domain(
            "example.myshopify.com",
        ));
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["platform"], "shopify");
        assert_eq!(value["myshopifyDomain"], "example.myshopify.com");
        assert!(value.get("platformId").is_none());
    }

    #[test]
    fn subscribe_params_defaults() {
        let params = SubscribeParams::new(PlanSelection::single("p1"));
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["planId"], "p1");
        assert_eq!(value["hosted"], true);
        assert_eq!(value["useSavedPaymentMethod"], false);
        assert!(value.get("planIds").is_none());
    }

    #[test]
    fn plan_selection_multiple_serializes_list() {
        let params = SubscribeParams::new(PlanSelection::multiple(["p1", "p2"]));
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["planIds"], json!(["p1", "p2"]));
        assert!(value.get("planId").is_none());
    }

    #[test]
    fn update_notification_keeps_id_out_of_body() {
        let params = UpdateNotificationParams {
            id: "ntf_1".to_string(),
            read_at: Some(Utc::now()),
            dismissed_at: None,
        };
        let value = serde_json::to_value(&params).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("readAt").is_some());
        assert!(value.get("dismissedAt").is_none());
    }

    #[test]
    fn list_invoices_defaults() {
        let value = serde_json::to_value(ListInvoicesParams::default()).unwrap();
        assert_eq!(value, json!({"page": 0, "limit": 10}));
    }
}
