//! Core types for the Mantle billing API.
//!
//! This crate provides the domain records exchanged with the Mantle app API
//! and the pure logic layered on top of them:
//!
//! - **Customers**: `Customer`, `Address`
//! - **Plans**: `Plan`, `UsageCharge`, `Discount`
//! - **Subscriptions**: `Subscription`, `SubscriptionLineItem`
//! - **Features**: `Feature` plus local entitlement evaluation
//! - **Usage**: `UsageEvent`, `UsageMetric`
//! - **Invoices, checklists, notifications**
//! - **Errors**: `MantleError` (the structured API error) and `ApiResult`
//!
//! All records are plain serde value types; the server is the source of
//! truth and nothing here is cached or mutated locally. The only logic that
//! runs on the client side is feature evaluation (see [`feature`]).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod checklist;
pub mod customer;
pub mod error;
pub mod feature;
pub mod invoice;
pub mod notification;
pub mod plan;
pub mod subscription;
pub mod usage;

pub use checklist::{Checklist, ChecklistStep};
pub use customer::{Address, BillingStatus, Customer};
pub use error::{ApiResult, MantleError};
pub use feature::{feature_enabled, feature_limit, Feature, FeatureType, NO_LIMIT, UNLIMITED};
pub use invoice::{Invoice, InvoiceLineItem, InvoiceStatus};
pub use notification::{
    DeliveryMethod, Notification, NotificationCta, NotificationTemplate,
};
pub use plan::{Discount, Plan, PlanInterval, UsageCharge};
pub use subscription::{AppliedDiscount, Subscription, SubscriptionLineItem};
pub use usage::{UsageEvent, UsageMetric};
