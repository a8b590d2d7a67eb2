//! In-process `UserRepository` used when no database is configured.
//!
//! Mirrors the PostgreSQL table's behaviour: serial ids starting at 1,
//! `date_created` stamped on insert, and a unique constraint on `user_name`
//! checked under the same lock as the insert.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, StoredUser, UserId, UserName};

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i32,
    users: Vec<StoredUser>,
}

/// Volatile user storage guarded by a mutex.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<MemoryState>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    ///
    /// # Errors
    /// Returns [`UserPersistenceError::Query`] if the lock is poisoned.
    pub fn len(&self) -> Result<usize, UserPersistenceError> {
        Ok(self.lock()?.users.len())
    }

    /// Whether no users are stored.
    ///
    /// # Errors
    /// Returns [`UserPersistenceError::Query`] if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.users.is_empty())
    }

    /// Find a stored user by username, hash included.
    ///
    /// # Errors
    /// Returns [`UserPersistenceError::Query`] if the lock is poisoned.
    pub fn find_by_user_name(
        &self,
        user_name: &str,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|user| user.user_name().as_str() == user_name)
            .cloned())
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, UserPersistenceError> {
        self.state
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn user_name_exists(&self, user_name: &UserName) -> Result<bool, UserPersistenceError> {
        Ok(self
            .lock()?
            .users
            .iter()
            .any(|user| user.user_name() == user_name))
    }

    async fn insert(&self, user: &NewUser) -> Result<StoredUser, UserPersistenceError> {
        let mut state = self.lock()?;
        if state
            .users
            .iter()
            .any(|existing| existing.user_name() == user.user_name())
        {
            return Err(UserPersistenceError::duplicate_user_name());
        }

        let id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id sequence exhausted"))?;
        state.last_id = id;

        let stored = user.clone().into_stored(UserId::new(id), Utc::now());
        state.users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<StoredUser>, UserPersistenceError> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|user| user.id() == id)
            .cloned())
    }
}
