//! User persistence adapters.
//!
//! - [`DieselUserRepository`]: PostgreSQL via Diesel, `diesel-async` and a
//!   `bb8` pool. Row structs and the table schema stay private to this module.
//! - [`InMemoryUserRepository`]: process-local storage for runs without a
//!   database and for tests.
//!
//! # Example
//!
//! ```no_run
//! use thingful::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), thingful::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/thingful")).await?;
//! let repo = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_user_repository;
mod memory_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use memory_user_repository::InMemoryUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DEFAULT_POOL_MAX_SIZE, DbPool, PoolConfig, PoolError};
