//! Driving port for registering and reading users.

use async_trait::async_trait;

use crate::domain::{Error, RegistrationRequest, UserId, UserView};

/// Use-case boundary called by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Validate, hash, persist and serialise a new user.
    async fn register(&self, request: RegistrationRequest) -> Result<UserView, Error>;

    /// Return the serialised view of an existing user.
    async fn find_user(&self, id: UserId) -> Result<UserView, Error>;
}
