//! Mantle client SDK.
//!
//! An async client for the Mantle app billing API: identify customers,
//! read customer/plan/subscription state, create and cancel subscriptions,
//! report usage, manage payment methods, list invoices, open hosted billing
//! sessions, and drive notifications and onboarding checklists.
//!
//! # Example
//!
//! ```no_run
//! use mantle_client::{MantleClient, PlanSelection, SubscribeParams};
//!
//! # async fn example() -> Result<(), mantle_client::ClientError> {
//! let client = MantleClient::with_customer_token("app_123", "customer-api-token")?;
//!
//! let subscription = client
//!     .subscribe(
//!         &SubscribeParams::new(PlanSelection::single("plan_pro"))
//!             .with_return_url("https://app.example.com/billing/done"),
//!     )
//!     .await?
//!     .into_result();
//!
//! match subscription {
//!     Ok(subscription) => {
//!         if let Some(url) = subscription.confirmation_url {
//!             // Send the customer here to approve the charge.
//!             println!("confirm at {url}");
//!         }
//!     }
//!     Err(api_error) => eprintln!("mantle rejected the request: {api_error}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error channels
//!
//! Calls fail on two deliberately separate channels. Transport and decode
//! problems surface as [`ClientError`] through the outer `Result`.
//! Application-level rejections the server reports in-band arrive as
//! [`mantle_core::MantleError`] values inside [`mantle_core::ApiResult`],
//! so callers pattern-match instead of probing response objects.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{
    ClientOptions, MantleClient, API_KEY_HEADER, APP_ID_HEADER, CUSTOMER_TOKEN_HEADER,
    DEFAULT_BASE_URL,
};
pub use error::ClientError;
pub use types::{
    Acknowledgement, AddPaymentMethodParams, CancelSubscriptionParams, ChecklistList,
    CreateHostedSessionParams, HostedSession, IdentifyParams, IdentifyResponse, InvoiceList,
    ListInvoicesParams, NotificationList, NotificationTemplateList, PlanSelection,
    PlatformIdentifier, SetupIntent, SubscribeParams, UpdateNotificationParams,
    UpdateSubscriptionParams, UsageMetricReport, UsageReportParams,
};

pub use mantle_core::{
    feature_enabled, feature_limit, ApiResult, BillingStatus, Checklist, ChecklistStep, Customer,
    Feature, FeatureType, Invoice, InvoiceStatus, MantleError, Notification, NotificationCta,
    NotificationTemplate, Plan, Subscription, UsageEvent, NO_LIMIT, UNLIMITED,
};
