//! User registration domain service.
//!
//! Runs the registration pipeline against the repository and hasher ports:
//! password policy, username uniqueness, hashing, insertion, serialisation.
//! Every user-facing rejection happens before the insert, which is the only
//! mutation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, UserPersistenceError, UserRegistration, UserRepository,
};
use crate::domain::{Error, RegistrationRequest, UserId, UserView, ValidatedPassword};

/// Message returned when a username is already registered.
pub const USER_NAME_TAKEN_MESSAGE: &str = "Username already taken";
/// Message returned when a user lookup misses.
pub const USER_NOT_FOUND_MESSAGE: &str = "User doesn't exist";
/// Message returned when the user store cannot be reached.
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "Service unavailable";

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            error!(%message, "user repository unavailable");
            Error::service_unavailable(SERVICE_UNAVAILABLE_MESSAGE)
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUserName => Error::invalid_request(USER_NAME_TAKEN_MESSAGE),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    error!(%error, "password hashing failed");
    Error::internal(error.to_string())
}

/// Registration service implementing the [`UserRegistration`] driving port.
#[derive(Clone)]
pub struct RegistrationService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> RegistrationService<R, H> {
    /// Create a service over a user repository and a password hasher.
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<R, H> UserRegistration for RegistrationService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, request: RegistrationRequest) -> Result<UserView, Error> {
        let password = ValidatedPassword::parse(request.password())
            .map_err(|violation| Error::invalid_request(violation.to_string()))?;

        let taken = self
            .users
            .user_name_exists(request.user_name())
            .await
            .map_err(map_repository_error)?;
        if taken {
            return Err(Error::invalid_request(USER_NAME_TAKEN_MESSAGE));
        }

        let hash = self.hasher.hash(&password).await.map_err(map_hash_error)?;
        drop(password);

        let stored = self
            .users
            .insert(&request.into_new_user(hash))
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %stored.id(), "registered user");
        Ok(UserView::from(&stored))
    }

    async fn find_user(&self, id: UserId) -> Result<UserView, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .map(|user| UserView::from(&user))
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
