//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserRegistration;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and lookup use-cases.
    pub registration: Arc<dyn UserRegistration>,
}

impl HttpState {
    /// Construct state from the registration port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use thingful::domain::RegistrationService;
    /// use thingful::inbound::http::state::HttpState;
    /// use thingful::outbound::hashing::BcryptPasswordHasher;
    /// use thingful::outbound::persistence::InMemoryUserRepository;
    ///
    /// let service = RegistrationService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(BcryptPasswordHasher::default()),
    /// );
    /// let state = HttpState::new(Arc::new(service));
    /// let _registration = state.registration.clone();
    /// ```
    pub fn new(registration: Arc<dyn UserRegistration>) -> Self {
        Self { registration }
    }
}
