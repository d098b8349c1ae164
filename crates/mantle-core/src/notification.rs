//! Notification records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a notification is delivered to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Shown inside the embedding application.
    InApp,
    /// Sent by email.
    Email,
    /// A method this client version does not know about.
    #[serde(other)]
    Unknown,
}

/// The call-to-action attached to a notification.
///
/// Either an external URL to open or a named in-app flow to start; the two
/// are mutually exclusive on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum NotificationCta {
    /// Open an external URL.
    Url {
        /// The URL to open.
        url: String,
    },
    /// Start a named in-app flow.
    Flow {
        /// The flow identifier.
        flow: String,
    },
}

/// A notification delivered (or deliverable) to a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Notification identifier.
    pub id: String,

    /// Headline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Message body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Call-to-action, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<NotificationCta>,

    /// Delivery channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_method: Option<DeliveryMethod>,

    /// When the customer read the notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime<Utc>>,

    /// When the customer dismissed the notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissed_at: Option<DateTime<Utc>>,

    /// When the notification was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A reusable notification template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTemplate {
    /// Template identifier.
    pub id: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Delivery channel notifications from this template use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_method: Option<DeliveryMethod>,
}
