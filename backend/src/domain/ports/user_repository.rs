//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, StoredUser, UserId, UserName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is already held by another stored user.
        DuplicateUserName => "user name already exists",
    }
}

/// Storage for registered users.
///
/// Adapters must enforce username uniqueness themselves so that concurrent
/// registrations cannot both succeed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Report whether a stored user has exactly this username.
    async fn user_name_exists(&self, user_name: &UserName) -> Result<bool, UserPersistenceError>;

    /// Insert a new user, returning the row with storage-assigned columns.
    ///
    /// Fails with [`UserPersistenceError::DuplicateUserName`] when the
    /// username is taken.
    async fn insert(&self, user: &NewUser) -> Result<StoredUser, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<StoredUser>, UserPersistenceError>;
}
