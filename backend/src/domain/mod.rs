//! Domain primitives, rules and services.
//!
//! Purpose: Define strongly typed user registration types and the service that
//! runs the registration pipeline. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Password policy: `validate_password`, `ValidatedPassword`, `PasswordHash`.
//! - User model: `RegistrationRequest`, `NewUser`, `StoredUser`, `UserView`.
//! - `RegistrationService`: implements the `UserRegistration` driving port.

pub mod error;
pub mod password;
pub mod ports;
pub mod registration_service;
pub mod sanitize;
pub mod trace_id;
pub mod user;
pub mod user_view;

pub use self::error::{Error, ErrorCode};
pub use self::password::{
    MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, PASSWORD_SPECIAL_CHARACTERS, PasswordHash,
    PasswordPolicyViolation, ValidatedPassword, validate_password,
};
pub use self::registration_service::{
    RegistrationService, SERVICE_UNAVAILABLE_MESSAGE, USER_NAME_TAKEN_MESSAGE,
    USER_NOT_FOUND_MESSAGE,
};
pub use self::sanitize::escape_markup;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    NewUser, RegistrationParts, RegistrationRequest, RegistrationValidationError, RequiredField,
    StoredUser, UserId, UserName,
};
pub use self::user_view::UserView;
