//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, RegistrationValidationError, RequiredField};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
        }
    }
}

pub(crate) fn missing_field_error(field: RequiredField) -> Error {
    Error::invalid_request(RegistrationValidationError::MissingField(field).to_string())
        .with_details(json!({
            "field": field.as_str(),
            "code": ErrorCode::MissingField.as_str(),
        }))
}

pub(crate) fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    match err {
        RegistrationValidationError::MissingField(field) => missing_field_error(field),
    }
}
