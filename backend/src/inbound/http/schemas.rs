//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and live in the inbound adapter
//! layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// Storage is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message returned to clients.
    #[schema(example = "Username already taken")]
    error: String,
    /// Stable machine-readable error code.
    code: ErrorCodeSchema,
    /// Correlation identifier for tracing this error across systems.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, such as the missing field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::UserView`].
#[derive(ToSchema)]
#[schema(as = UserView)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserViewSchema {
    /// Storage-assigned identifier.
    #[schema(example = 1)]
    id: i32,
    /// Markup-escaped display name.
    #[schema(example = "Apples Apples")]
    full_name: String,
    /// Markup-escaped username.
    #[schema(example = "apple")]
    user_name: String,
    /// Markup-escaped nickname; omitted when the user has none.
    #[schema(example = "Appy")]
    nickname: Option<String>,
    /// Registration timestamp, RFC 3339.
    #[schema(value_type = String, format = DateTime, example = "2029-01-22T16:28:32Z")]
    date_created: String,
}
