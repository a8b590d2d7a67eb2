//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: user storage in PostgreSQL (Diesel) or in memory
//! - **hashing**: bcrypt password hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod hashing;
pub mod persistence;
