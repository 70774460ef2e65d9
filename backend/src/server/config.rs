//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use menu_backend::config::Auth0Settings;
use menu_backend::outbound::persistence::DbPool;

const DEFAULT_JWKS_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_JWKS_CACHE_TTL: Duration = Duration::from_secs(300);

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) auth0: Auth0Settings,
    pub(crate) jwks_cache_ttl: Option<Duration>,
    pub(crate) jwks_timeout: Duration,
}

impl ServerConfig {
    /// Construct a server configuration with the default key set tuning.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, auth0: Auth0Settings) -> Self {
        Self {
            bind_addr,
            db_pool,
            auth0,
            jwks_cache_ttl: Some(DEFAULT_JWKS_CACHE_TTL),
            jwks_timeout: DEFAULT_JWKS_TIMEOUT,
        }
    }

    /// Cache fetched key sets for `ttl`; `None` fetches on every request.
    #[must_use]
    pub fn with_jwks_cache_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.jwks_cache_ttl = ttl;
        self
    }

    /// Bound each key set fetch by `timeout`.
    #[must_use]
    pub fn with_jwks_timeout(mut self, timeout: Duration) -> Self {
        self.jwks_timeout = timeout;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
