//! Invoice records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Finalized but not yet paid.
    Open,
    /// Paid in full.
    Paid,
    /// Voided before payment.
    Void,
    /// Written off as uncollectible.
    Uncollectible,
    /// A status this client version does not know about.
    #[serde(other)]
    Unknown,
}

/// One line on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineItem {
    /// Line identifier.
    pub id: String,

    /// Customer-facing description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Line amount in the invoice currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    /// Quantity billed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
}

/// An invoice issued against a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Mantle's identifier for this invoice.
    pub id: String,

    /// Payment state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,

    /// ISO currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,

    /// Total after discounts and taxes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,

    /// Subtotal before discounts and taxes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,

    /// Start of the billed period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_start: Option<DateTime<Utc>>,

    /// End of the billed period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<DateTime<Utc>>,

    /// Invoice lines.
    #[serde(default)]
    pub line_items: Vec<InvoiceLineItem>,

    /// When the invoice was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
