//! Structured API errors and the tagged call result.
//!
//! The Mantle API signals application-level failures in-band: a JSON object
//! carrying an `error` field, regardless of HTTP status. Those are ordinary
//! values to callers, not exceptions, so they get their own type here and a
//! tagged [`ApiResult`] to pattern-match on. Transport-level failures live
//! in the client crate's error enum and never take this shape.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An application-level error returned by the Mantle API.
///
/// Any response body that parses to an object with an `error` key is
/// normalized into this record and handed back as a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MantleError {
    /// Human-readable error message.
    pub error: String,

    /// Additional vendor-supplied context, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl MantleError {
    /// Create an error with a message and no details.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

impl fmt::Display for MantleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{} ({details})", self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for MantleError {}

/// The outcome of an API call that reached the server and parsed cleanly.
///
/// `Ok` carries the typed payload; `Err` carries the structured
/// [`MantleError`] the server put in the body. Callers match on this
/// instead of probing response objects for an `error` field.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    /// The call succeeded; the typed payload.
    Ok(T),
    /// The server reported an application-level error.
    Err(MantleError),
}

impl<T> ApiResult<T> {
    /// True if this is the success variant.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// True if this is the structured-error variant.
    #[must_use]
    pub fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// The payload, discarding a structured error.
    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Err(_) => None,
        }
    }

    /// Convert into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the structured [`MantleError`] for the error variant.
    pub fn into_result(self) -> Result<T, MantleError> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Err(err) => Err(err),
        }
    }

    /// Map the success payload, leaving a structured error untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            Self::Ok(value) => ApiResult::Ok(f(value)),
            Self::Err(err) => ApiResult::Err(err),
        }
    }
}

impl<T> From<ApiResult<T>> for Result<T, MantleError> {
    fn from(value: ApiResult<T>) -> Self {
        value.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_details() {
        let err = MantleError::new("Unauthorized");
        assert_eq!(err.to_string(), "Unauthorized");
    }

    #[test]
    fn display_with_details() {
        let err = MantleError {
            error: "Invalid plan".to_string(),
            details: Some(serde_json::json!({"planId": "p1"})),
        };
        assert!(err.to_string().starts_with("Invalid plan ("));
    }

    #[test]
    fn deserializes_error_envelope() {
        let err: MantleError =
            serde_json::from_str(r#"{"error":"Unauthorized","details":"bad token"}"#).unwrap();
        assert_eq!(err.error, "Unauthorized");
        assert_eq!(err.details, Some(serde_json::json!("bad token")));
    }

    #[test]
    fn api_result_combinators() {
        let ok: ApiResult<i32> = ApiResult::Ok(7);
        assert!(ok.is_ok());
        assert_eq!(ok.clone().map(|v| v + 1).ok(), Some(8));
        assert_eq!(ok.into_result().unwrap(), 7);

        let err: ApiResult<i32> = ApiResult::Err(MantleError::new("nope"));
        assert!(err.is_err());
        assert_eq!(err.clone().ok(), None);
        assert_eq!(err.into_result().unwrap_err().error, "nope");
    }
}
