//! bcrypt-backed `PasswordHasher` implementation.
//!
//! Hashing and verification run on Tokio's blocking pool, off the request
//! executor.

use async_trait::async_trait;
use tokio::task;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PasswordHash, ValidatedPassword};

/// Work factor used in production.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// bcrypt password hasher with a configurable work factor.
///
/// # Examples
/// ```
/// use thingful::outbound::hashing::{BcryptPasswordHasher, DEFAULT_BCRYPT_COST};
///
/// let hasher = BcryptPasswordHasher::default();
/// assert_eq!(hasher.cost(), DEFAULT_BCRYPT_COST);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl BcryptPasswordHasher {
    /// Create a hasher with an explicit work factor. bcrypt accepts 4 to 31.
    #[must_use]
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Configured work factor.
    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

fn map_join_error(error: task::JoinError) -> PasswordHashError {
    debug!(%error, "bcrypt task did not complete");
    PasswordHashError::hashing(format!("hashing task failed: {error}"))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &ValidatedPassword) -> Result<PasswordHash, PasswordHashError> {
        let password = password.clone();
        let cost = self.cost;
        let hashed = task::spawn_blocking(move || bcrypt::hash(password.expose(), cost))
            .await
            .map_err(map_join_error)?
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(PasswordHash::new(hashed))
    }

    async fn verify(
        &self,
        candidate: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let candidate = Zeroizing::new(candidate.to_owned());
        let hash = hash.as_str().to_owned();
        task::spawn_blocking(move || bcrypt::verify(candidate.as_str(), &hash))
            .await
            .map_err(map_join_error)?
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }
}
