//! User registration service library.
//!
//! The crate is split along hexagonal lines: [`domain`] holds the
//! registration rules and ports, [`inbound`] adapts HTTP onto them and
//! [`outbound`] provides storage and hashing adapters.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
