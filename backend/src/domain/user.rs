//! User registration data model.
//!
//! Three shapes travel through registration:
//! - [`RegistrationRequest`]: the candidate input, checked for required
//!   fields but otherwise untrusted.
//! - [`NewUser`]: the record handed to storage, holding a password hash.
//! - [`StoredUser`]: the persisted row with storage-assigned `id` and
//!   `date_created`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::password::PasswordHash;

/// Storage-assigned user identifier.
///
/// # Examples
/// ```
/// use thingful::domain::UserId;
///
/// let id = UserId::new(7);
/// assert_eq!(id.as_i32(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Required registration fields, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    /// `full_name`
    FullName,
    /// `user_name`
    UserName,
    /// `password`
    Password,
}

impl RequiredField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::UserName => "user_name",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain error returned when a registration payload is incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// A required field was absent or empty.
    #[error("Missing '{0}' in request body")]
    MissingField(RequiredField),
}

/// Login name, unique across stored users. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    /// Validate and wrap a username. Comparison is exact and case-sensitive.
    ///
    /// # Errors
    /// Returns [`RegistrationValidationError::MissingField`] when empty.
    pub fn new(value: impl Into<String>) -> Result<Self, RegistrationValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(RegistrationValidationError::MissingField(
                RequiredField::UserName,
            ));
        }
        Ok(Self(value))
    }

    /// Borrow the username.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw registration inputs before required-field checks.
#[derive(Default)]
pub struct RegistrationParts<'a> {
    /// Requested username.
    pub user_name: &'a str,
    /// Plaintext password.
    pub password: &'a str,
    /// Display name.
    pub full_name: &'a str,
    /// Optional nickname.
    pub nick_name: Option<&'a str>,
}

/// Candidate registration input with all required fields present.
///
/// ## Invariants
/// - `full_name`, `user_name` and `password` are non-empty.
/// - `nick_name` is `None` rather than `Some("")`.
/// - The password is wiped from memory on drop and never reaches storage.
///
/// # Examples
/// ```
/// use thingful::domain::{RegistrationParts, RegistrationRequest};
///
/// let request = RegistrationRequest::try_from_parts(RegistrationParts {
///     user_name: "apple",
///     password: "aadsi8d!!%%s78dSd",
///     full_name: "Apples Apples",
///     nick_name: Some(""),
/// })
/// .unwrap();
/// assert_eq!(request.user_name().as_str(), "apple");
/// assert!(request.nick_name().is_none());
/// ```
#[derive(Clone)]
pub struct RegistrationRequest {
    user_name: UserName,
    full_name: String,
    nick_name: Option<String>,
    password: Zeroizing<String>,
}

impl RegistrationRequest {
    /// Check required fields in order: `full_name`, `user_name`, `password`.
    ///
    /// # Errors
    /// Returns [`RegistrationValidationError::MissingField`] naming the first
    /// absent or empty field.
    pub fn try_from_parts(parts: RegistrationParts<'_>) -> Result<Self, RegistrationValidationError> {
        let RegistrationParts {
            user_name,
            password,
            full_name,
            nick_name,
        } = parts;

        if full_name.is_empty() {
            return Err(RegistrationValidationError::MissingField(
                RequiredField::FullName,
            ));
        }
        let user_name = UserName::new(user_name)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::MissingField(
                RequiredField::Password,
            ));
        }

        Ok(Self {
            user_name,
            full_name: full_name.to_owned(),
            nick_name: nick_name.filter(|nick| !nick.is_empty()).map(str::to_owned),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested username.
    #[must_use]
    pub fn user_name(&self) -> &UserName {
        &self.user_name
    }

    /// Display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Optional nickname.
    #[must_use]
    pub fn nick_name(&self) -> Option<&str> {
        self.nick_name.as_deref()
    }

    /// Plaintext password, still subject to policy checks.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Attach a password hash, producing the record handed to storage.
    #[must_use]
    pub fn into_new_user(self, password_hash: PasswordHash) -> NewUser {
        NewUser {
            user_name: self.user_name,
            full_name: self.full_name,
            nick_name: self.nick_name,
            password_hash,
        }
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("user_name", &self.user_name)
            .field("full_name", &self.full_name)
            .field("nick_name", &self.nick_name)
            .finish_non_exhaustive()
    }
}

/// User record ready for insertion. Carries a hash, never a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    user_name: UserName,
    full_name: String,
    nick_name: Option<String>,
    password_hash: PasswordHash,
}

impl NewUser {
    /// Username to insert.
    #[must_use]
    pub fn user_name(&self) -> &UserName {
        &self.user_name
    }

    /// Display name to insert.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Optional nickname to insert.
    #[must_use]
    pub fn nick_name(&self) -> Option<&str> {
        self.nick_name.as_deref()
    }

    /// Hash to insert.
    #[must_use]
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Combine with storage-assigned columns.
    #[must_use]
    pub fn into_stored(self, id: UserId, date_created: DateTime<Utc>) -> StoredUser {
        StoredUser {
            id,
            user_name: self.user_name,
            full_name: self.full_name,
            nick_name: self.nick_name,
            password_hash: self.password_hash,
            date_created,
        }
    }
}

/// Persisted user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    id: UserId,
    user_name: UserName,
    full_name: String,
    nick_name: Option<String>,
    password_hash: PasswordHash,
    date_created: DateTime<Utc>,
}

impl StoredUser {
    /// Rebuild a stored user from persisted columns.
    pub(crate) fn from_columns(
        id: UserId,
        user_name: UserName,
        full_name: String,
        nick_name: Option<String>,
        password_hash: PasswordHash,
        date_created: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_name,
            full_name,
            nick_name,
            password_hash,
            date_created,
        }
    }

    /// Storage-assigned identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Username.
    #[must_use]
    pub fn user_name(&self) -> &UserName {
        &self.user_name
    }

    /// Display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Optional nickname.
    #[must_use]
    pub fn nick_name(&self) -> Option<&str> {
        self.nick_name.as_deref()
    }

    /// Stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Insertion timestamp.
    #[must_use]
    pub fn date_created(&self) -> DateTime<Utc> {
        self.date_created
    }
}
