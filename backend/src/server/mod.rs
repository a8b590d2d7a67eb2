//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::warn;

use thingful::Trace;
#[cfg(debug_assertions)]
use thingful::doc::ApiDoc;
use thingful::domain::RegistrationService;
use thingful::domain::ports::UserRegistration;
use thingful::inbound::http::error::json_error_handler;
use thingful::inbound::http::health::{HealthState, live, ready};
use thingful::inbound::http::state::HttpState;
use thingful::inbound::http::users::{get_user, register_user};
use thingful::outbound::hashing::BcryptPasswordHasher;
use thingful::outbound::persistence::{DbPool, DieselUserRepository, InMemoryUserRepository};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the registration service over PostgreSQL when a pool is configured,
/// otherwise over process-local storage.
fn build_registration(db_pool: Option<DbPool>) -> Arc<dyn UserRegistration> {
    let hasher = Arc::new(BcryptPasswordHasher::default());
    match db_pool {
        Some(pool) => Arc::new(RegistrationService::new(
            Arc::new(DieselUserRepository::new(pool)),
            hasher,
        )),
        None => {
            warn!("no database configured; registered users are kept in memory");
            Arc::new(RegistrationService::new(
                Arc::new(InMemoryUserRepository::new()),
                hasher,
            ))
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .service(register_user)
        .service(get_user);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig { bind_addr, db_pool } = config;
    let http_state = web::Data::new(HttpState::new(build_registration(db_pool)));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
