//! Correlation identifiers for registration requests.
//!
//! The HTTP middleware opens a [`TraceId`] scope per request. Anything that
//! runs inside it, such as [`crate::domain::Error`] constructors, can read the
//! identifier back with [`TraceId::current`]. Work moved to another task does
//! not inherit the scope and must be wrapped again with [`TraceId::scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

/// Response header that echoes the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

tokio::task_local! {
    static ACTIVE: TraceId;
}

/// UUID attached to one request for log and error correlation.
///
/// # Examples
/// ```
/// use thingful::domain::TraceId;
///
/// let id: TraceId = "6f1c1f8e-3d55-4a44-9b1e-0d5c8f1f2a10".parse().unwrap();
/// assert_eq!(id.to_string(), "6f1c1f8e-3d55-4a44-9b1e-0d5c8f1f2a10");
/// assert!(TraceId::current().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random (v4) identifier.
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the enclosing scope, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        ACTIVE.try_with(|id| *id).ok()
    }

    /// Run `fut` with `id` as the current identifier.
    pub async fn scope<F: Future>(id: Self, fut: F) -> F::Output {
        ACTIVE.scope(id, fut).await
    }

    /// Underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
