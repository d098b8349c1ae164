//! Client error types.
//!
//! This is the hard-failure channel: transport problems and unparseable
//! responses. Application-level errors the server reports in-band are
//! [`mantle_core::MantleError`] values, returned inside
//! [`mantle_core::ApiResult`] and never raised through this enum.

/// Errors that can occur when using the Mantle client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request failed at the transport level (DNS, connect,
    /// timeout). Never retried.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON, or did not match the expected
    /// shape.
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
