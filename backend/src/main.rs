//! Backend entry-point: loads configuration, wires adapters and serves the
//! REST API.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use menu_backend::config::{ServerSettings, auth0_settings_from_env, database_url_from_env};
use menu_backend::inbound::http::health::HealthState;
use menu_backend::outbound::persistence::{DbPool, PoolConfig};
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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load server settings: {e}")))?;
    let env = DefaultEnv::new();
    let auth0 = auth0_settings_from_env(&env).map_err(io::Error::other)?;
    let database_url = database_url_from_env(&env).map_err(io::Error::other)?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| io::Error::other(format!("invalid bind address: {e}")))?;

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(io::Error::other)?;

    let config = ServerConfig::new(bind_addr, pool, auth0)
        .with_jwks_cache_ttl(settings.jwks_cache_ttl())
        .with_jwks_timeout(settings.jwks_timeout());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "menu backend listening");
    server.await
}
