//! Failure payload returned by registration use-cases.
//!
//! [`Error`] carries no HTTP types. The inbound adapter decides status codes
//! and redaction from [`ErrorCode`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::TraceId;

/// Failure category, serialised in `snake_case` as the `code` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Missing field, weak password or taken username.
    InvalidRequest,
    /// No user with the requested id.
    NotFound,
    /// The user store cannot be reached.
    ServiceUnavailable,
    /// Storage or hashing failed unexpectedly.
    InternalError,
}

/// Registration failure.
///
/// Wire shape: `{"error": <message>, "code": <code>, "traceId"?, "details"?}`.
///
/// ```
/// use thingful::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("User doesn't exist");
/// assert_eq!((err.code(), err.message()), (ErrorCode::NotFound, "User doesn't exist"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[serde(rename = "error")]
    message: String,
    code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    details: Option<Value>,
}

impl Error {
    /// Build an error, stamping it with the current [`TraceId`] if any.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Failure category.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message shown to clients under `error`.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace id captured at construction.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured extras, such as the missing field.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Override the trace id.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured extras.
    ///
    /// ```
    /// use thingful::domain::Error;
    ///
    /// let err = Error::invalid_request("Missing 'user_name' in request body")
    ///     .with_details(serde_json::json!({ "field": "user_name" }));
    /// assert_eq!(err.details().and_then(|d| d.get("field")), Some(&serde_json::json!("user_name")));
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// 400-class rejection.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Unexpected failure; the message is logged, never shown.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
