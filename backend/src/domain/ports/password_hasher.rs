//! Port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::{PasswordHash, ValidatedPassword};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// The hashing backend rejected the input or failed internally.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Salted, adaptive password hashing.
///
/// Only accepts [`ValidatedPassword`], so every hash it produces belongs to a
/// password that passed the policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a password with a fresh salt.
    async fn hash(&self, password: &ValidatedPassword) -> Result<PasswordHash, PasswordHashError>;

    /// Check a candidate plaintext against a stored hash.
    async fn verify(&self, candidate: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHashError>;
}
