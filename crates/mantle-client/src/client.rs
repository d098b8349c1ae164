//! Mantle HTTP client implementation.

use reqwest::{header, Client, Method};
use serde::de::DeserializeOwned;

use mantle_core::{ApiResult, Checklist, Customer, MantleError, Notification, Subscription, UsageEvent};

use crate::error::ClientError;
use crate::types::{
    Acknowledgement, AddPaymentMethodParams, CancelSubscriptionParams, ChecklistList,
    CreateHostedSessionParams, CustomerEnvelope, HostedSession, HostedSessionEnvelope,
    IdentifyParams, IdentifyResponse, InvoiceList, ListInvoicesParams, NotificationList,
    NotificationTemplateList, NotifyEnvelope, SetupIntent, SubscribeParams,
    UpdateNotificationParams, UpdateSubscriptionParams, UsageEventsEnvelope, UsageMetricReport,
    UsageReportParams,
};

/// Default production endpoint of the Mantle app API.
pub const DEFAULT_BASE_URL: &str = "https://appapi.heymantle.com/v1";

/// Header carrying the app identifier, sent on every request.
pub const APP_ID_HEADER: &str = "X-Mantle-App-Id";

/// Header carrying the server-side API key.
pub const API_KEY_HEADER: &str = "X-Mantle-App-Api-Key";

/// Header carrying the customer-scoped API token.
pub const CUSTOMER_TOKEN_HEADER: &str = "X-Mantle-Customer-Api-Token";

/// Which credential the client authenticates with.
///
/// Exactly one mode exists per client, so the server-side API key can never
/// be combined with (or mistaken for) the browser-safe customer token.
#[derive(Debug, Clone)]
enum Auth {
    /// Server-side secret; must not ship to browsers.
    ApiKey(String),
    /// Customer-scoped token from `identify`; safe for browser use.
    CustomerToken(String),
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the Mantle app API.
    pub base_url: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientOptions {
    /// Create options pointing at a non-production endpoint.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Mantle app API client.
///
/// Every method maps one-to-one onto a remote endpoint and issues at most
/// one HTTP call. Results come back on two channels that are never unified:
/// the outer `Result` fails only on transport or decode problems, while
/// application-level errors the server reports in-band arrive as
/// [`ApiResult::Err`] values for the caller to match on.
///
/// The client holds no state besides its immutable configuration, so it is
/// cheap to clone and safe to share across tasks. No retries, backoff, or
/// timeouts are applied at this layer; cancellation and deadlines belong to
/// the caller's runtime and the transport defaults.
#[derive(Debug, Clone)]
pub struct MantleClient {
    client: Client,
    base_url: String,
    app_id: String,
    auth: Auth,
}

impl MantleClient {
    /// Create a server-side client authenticating with the app API key.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if `app_id` or `api_key` is
    /// empty.
    pub fn with_api_key(
        app_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Self::build(app_id.into(), Auth::ApiKey(api_key.into()), ClientOptions::default())
    }

    /// Create a server-side client with custom options.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if `app_id` or `api_key` is
    /// empty.
    pub fn with_api_key_and_options(
        app_id: impl Into<String>,
        api_key: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        Self::build(app_id.into(), Auth::ApiKey(api_key.into()), options)
    }

    /// Create a customer-scoped client authenticating with the API token
    /// returned by [`identify`](Self::identify).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if `app_id` or `customer_api_token`
    /// is empty.
    pub fn with_customer_token(
        app_id: impl Into<String>,
        customer_api_token: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Self::build(
            app_id.into(),
            Auth::CustomerToken(customer_api_token.into()),
            ClientOptions::default(),
        )
    }

    /// Create a customer-scoped client with custom options.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if `app_id` or `customer_api_token`
    /// is empty.
    pub fn with_customer_token_and_options(
        app_id: impl Into<String>,
        customer_api_token: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        Self::build(
            app_id.into(),
            Auth::CustomerToken(customer_api_token.into()),
            options,
        )
    }

    fn build(app_id: String, auth: Auth, options: ClientOptions) -> Result<Self, ClientError> {
        if app_id.is_empty() {
            return Err(ClientError::Configuration("app_id must not be empty".into()));
        }
        let credential = match &auth {
            Auth::ApiKey(key) | Auth::CustomerToken(key) => key,
        };
        if credential.is_empty() {
            return Err(ClientError::Configuration(
                "credential must not be empty".into(),
            ));
        }

        // No timeout on purpose: deadlines and cancellation are delegated
        // entirely to the transport defaults and the caller's runtime.
        Ok(Self {
            client: Client::new(),
            base_url: options.base_url.trim_end_matches('/').to_string(),
            app_id,
            auth,
        })
    }

    // ========================================================================
    // Request gateway
    // ========================================================================

    /// Build, send, and normalize one API call.
    ///
    /// A GET body is serialized as query parameters; any other method sends
    /// it as JSON. A non-2xx status or a parsed body carrying an `error`
    /// key becomes `ApiResult::Err`; everything else deserializes into `T`.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResult<T>, ClientError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .header(APP_ID_HEADER, &self.app_id);

        request = match &self.auth {
            Auth::ApiKey(key) => request.header(API_KEY_HEADER, key),
            Auth::CustomerToken(token) => request.header(CUSTOMER_TOKEN_HEADER, token),
        };

        if let Some(body) = body {
            request = if method == Method::GET {
                request.query(&query_pairs(&body))
            } else {
                request.json(&body)
            };
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(path = %path, error = %err, "mantle request failed");
                return Err(ClientError::Http(err));
            }
        };

        let status = response.status();
        let text = response.text().await?;
        let payload: serde_json::Value = serde_json::from_str(&text)?;

        if !status.is_success() || payload.get("error").is_some() {
            let error = serde_json::from_value::<MantleError>(payload)
                .unwrap_or_else(|_| MantleError::new(format!("HTTP {status}")));
            return Ok(ApiResult::Err(error));
        }

        Ok(ApiResult::Ok(serde_json::from_value(payload)?))
    }

    // ========================================================================
    // Customers
    // ========================================================================

    /// Register or update a customer record and mint a customer API token.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn identify(
        &self,
        params: &IdentifyParams,
    ) -> Result<ApiResult<IdentifyResponse>, ClientError> {
        let body = serde_json::to_value(params)?;
        self.request(Method::POST, "identify", Some(body)).await
    }

    /// Fetch the customer the configured token is scoped to.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn get_customer(&self) -> Result<ApiResult<Customer>, ClientError> {
        let result: ApiResult<CustomerEnvelope> =
            self.request(Method::GET, "customer", None).await?;
        Ok(result.map(|envelope| envelope.customer))
    }

    /// Fetch a customer by id. Only meaningful with API-key authentication;
    /// a customer token is already scoped to one customer.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn get_customer_by_id(&self, id: &str) -> Result<ApiResult<Customer>, ClientError> {
        let result: ApiResult<CustomerEnvelope> = self
            .request(Method::GET, "customer", Some(serde_json::json!({ "id": id })))
            .await?;
        Ok(result.map(|envelope| envelope.customer))
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Create a subscription. A pending subscription carries a
    /// `confirmation_url` the customer must visit.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn subscribe(
        &self,
        params: &SubscribeParams,
    ) -> Result<ApiResult<Subscription>, ClientError> {
        let body = serde_json::to_value(params)?;
        self.request(Method::POST, "subscriptions", Some(body)).await
    }

    /// Cancel the current subscription, optionally recording a reason.
    /// `None` sends no request body at all.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn cancel_subscription(
        &self,
        params: Option<&CancelSubscriptionParams>,
    ) -> Result<ApiResult<Subscription>, ClientError> {
        let body = params.map(serde_json::to_value).transpose()?;
        self.request(Method::DELETE, "subscriptions", body).await
    }

    /// Update a subscription's usage cap.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn update_subscription(
        &self,
        params: &UpdateSubscriptionParams,
    ) -> Result<ApiResult<Subscription>, ClientError> {
        let body = serde_json::to_value(params)?;
        self.request(Method::PUT, "subscriptions", Some(body)).await
    }

    // ========================================================================
    // Usage
    // ========================================================================

    /// Report a single usage event. Supply `event_id` for idempotency;
    /// duplicates are dropped server-side, never retried client-side.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn send_usage_event(
        &self,
        event: &UsageEvent,
    ) -> Result<ApiResult<Acknowledgement>, ClientError> {
        let body = serde_json::to_value(event)?;
        self.request(Method::POST, "usage_events", Some(body)).await
    }

    /// Report multiple usage events in one call. All-or-nothing from the
    /// caller's perspective; there is no partial-failure reporting.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn send_usage_events(
        &self,
        events: &[UsageEvent],
    ) -> Result<ApiResult<Acknowledgement>, ClientError> {
        let body = serde_json::to_value(UsageEventsEnvelope { events })?;
        self.request(Method::POST, "usage_events", Some(body)).await
    }

    /// Fetch an aggregated report for a usage metric.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn get_usage_metric_report(
        &self,
        params: &UsageReportParams,
    ) -> Result<ApiResult<UsageMetricReport>, ClientError> {
        let path = format!("usage_events/{}/report", params.usage_metric_id);
        let mut query = serde_json::Map::new();
        if let Some(period) = &params.period {
            query.insert("period".to_string(), serde_json::Value::from(period.clone()));
        }
        if let Some(customer_id) = &params.customer_id {
            query.insert(
                "customerId".to_string(),
                serde_json::Value::from(customer_id.clone()),
            );
        }
        let body = (!query.is_empty()).then(|| serde_json::Value::Object(query));
        self.request(Method::GET, &path, body).await
    }

    // ========================================================================
    // Payment methods, invoices, hosted sessions
    // ========================================================================

    /// Start collection of a new payment method. The returned intent's
    /// `client_secret` is handed to the payment provider's frontend library.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn add_payment_method(
        &self,
        params: &AddPaymentMethodParams,
    ) -> Result<ApiResult<SetupIntent>, ClientError> {
        let body = serde_json::to_value(params)?;
        self.request(Method::POST, "payment_methods", Some(body)).await
    }

    /// List the customer's invoices. Defaults to the first page of ten.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn list_invoices(
        &self,
        params: &ListInvoicesParams,
    ) -> Result<ApiResult<InvoiceList>, ClientError> {
        let body = serde_json::to_value(params)?;
        self.request(Method::GET, "invoices", Some(body)).await
    }

    /// Create a hosted billing session and return its URL.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, or `ClientError::Json` when a
    /// 2xx response carries no session object.
    pub async fn create_hosted_session(
        &self,
        params: &CreateHostedSessionParams,
    ) -> Result<ApiResult<HostedSession>, ClientError> {
        let body = serde_json::to_value(params)?;
        let result: ApiResult<HostedSessionEnvelope> = self
            .request(Method::POST, "hosted_sessions", Some(body))
            .await?;
        Ok(result.map(|envelope| envelope.session))
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Send notifications from a template to the current customer.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn notify(
        &self,
        template_id: &str,
    ) -> Result<ApiResult<Vec<Notification>>, ClientError> {
        let path = format!("notification_templates/{template_id}/notify");
        let result: ApiResult<NotifyEnvelope> = self.request(Method::POST, &path, None).await?;
        Ok(result.map(|envelope| envelope.notifies))
    }

    /// List the customer's notifications.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn list_notifications(&self) -> Result<ApiResult<NotificationList>, ClientError> {
        self.request(Method::GET, "notifications", None).await
    }

    /// List the app's notification templates.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn list_notification_templates(
        &self,
    ) -> Result<ApiResult<NotificationTemplateList>, ClientError> {
        self.request(Method::GET, "notification_templates", None).await
    }

    /// Record that the customer acted on a notification's call-to-action.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn trigger_notification_cta(
        &self,
        id: &str,
    ) -> Result<ApiResult<Acknowledgement>, ClientError> {
        let path = format!("notifications/{id}/trigger");
        self.request(Method::POST, &path, None).await
    }

    /// Mark a notification read and/or dismissed.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn update_notification(
        &self,
        params: &UpdateNotificationParams,
    ) -> Result<ApiResult<Acknowledgement>, ClientError> {
        let path = format!("notifications/{}", params.id);
        let body = serde_json::to_value(params)?;
        self.request(Method::PUT, &path, Some(body)).await
    }

    // ========================================================================
    // Checklists
    // ========================================================================

    /// List onboarding checklists with this customer's progress.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn get_checklists(&self) -> Result<ApiResult<ChecklistList>, ClientError> {
        self.request(Method::GET, "checklists", None).await
    }

    /// Fetch one checklist by id or handle.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn get_checklist(&self, id: &str) -> Result<ApiResult<Checklist>, ClientError> {
        let path = format!("checklists/{id}");
        self.request(Method::GET, &path, None).await
    }

    /// Mark a checklist step complete.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn complete_checklist_step(
        &self,
        checklist_id: &str,
        step_id: &str,
    ) -> Result<ApiResult<Acknowledgement>, ClientError> {
        let path = format!("checklists/{checklist_id}/steps/{step_id}/complete");
        self.request(Method::POST, &path, None).await
    }

    /// Skip a checklist step.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn skip_checklist_step(
        &self,
        checklist_id: &str,
        step_id: &str,
    ) -> Result<ApiResult<Acknowledgement>, ClientError> {
        let path = format!("checklists/{checklist_id}/steps/{step_id}/skip");
        self.request(Method::POST, &path, None).await
    }

    /// Record that a checklist was shown to the customer.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn show_checklist(&self, id: &str) -> Result<ApiResult<Acknowledgement>, ClientError> {
        let path = format!("checklists/{id}/shown");
        self.request(Method::POST, &path, None).await
    }

    // ========================================================================
    // Feature helpers
    // ========================================================================

    /// Whether a named feature permits an action at the given count
    /// (defaulting to 0). Fetches the customer, then evaluates locally; a
    /// structured error from the fetch is propagated unchanged instead of
    /// being evaluated.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn is_feature_enabled(
        &self,
        key: &str,
        count: Option<i64>,
    ) -> Result<ApiResult<bool>, ClientError> {
        let customer = self.get_customer().await?;
        Ok(customer.map(|c| c.feature_enabled(key, count.unwrap_or(0))))
    }

    /// The numeric cap for a named `limit` feature, or `-1` when the
    /// customer has no limit information for it.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable response.
    pub async fn limit_for_feature(&self, key: &str) -> Result<ApiResult<i64>, ClientError> {
        let customer = self.get_customer().await?;
        Ok(customer.map(|c| c.feature_limit(key)))
    }
}

/// Flatten a JSON object into query-string pairs. Strings pass through
/// unquoted; other values use their JSON rendering.
fn query_pairs(body: &serde_json::Value) -> Vec<(String, String)> {
    body.as_object()
        .map(|map| {
            map.iter()
                .map(|(key, value)| {
                    let rendered = match value {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (key.clone(), rendered)
                })
                .collect()
        })
        .unwrap_or_default()
}
