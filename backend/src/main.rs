//! Service entry-point: loads configuration, prepares storage and serves the
//! registration API.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use thingful::config::AppSettings;
use thingful::inbound::http::health::HealthState;
use thingful::outbound::persistence::{DbPool, PoolConfig, run_migrations};

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| io::Error::other(format!("failed to load configuration: {err}")))?;
    let bind_addr = settings.bind_address().map_err(io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr);
    if let Some(database_url) = settings.database_url() {
        if settings.skip_migrations {
            info!("skipping database migrations");
        } else {
            let url = database_url.to_owned();
            tokio::task::spawn_blocking(move || run_migrations(&url))
                .await
                .map_err(io::Error::other)?
                .map_err(io::Error::other)?;
        }

        let pool_config = PoolConfig::new(database_url)
            .with_max_size(settings.pool_max_size().map_err(io::Error::other)?);
        let pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting HTTP server");
    create_server(health_state, config)?.await
}
