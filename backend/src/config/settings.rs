//! Server tuning loaded via OrthoConfig.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_JWKS_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_JWKS_TIMEOUT_SECS: u64 = 10;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Listener, key-set and pool tuning for the HTTP server.
///
/// Every field is optional; accessors supply the defaults. Values come from
/// `MENU_API_*` environment variables, configuration files or CLI flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MENU_API")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Seconds a fetched key set stays cached; `0` disables caching.
    pub jwks_cache_ttl: Option<u64>,
    /// Seconds allowed for a key set fetch.
    pub jwks_timeout: Option<u64>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl ServerSettings {
    /// Interface to bind, defaulting to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Port to bind, defaulting to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Parse the bind address.
    ///
    /// # Errors
    /// Returns the parse error when `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host(), self.port()).parse()
    }

    /// Key set cache lifetime, or `None` when caching is disabled.
    pub fn jwks_cache_ttl(&self) -> Option<Duration> {
        match self.jwks_cache_ttl.unwrap_or(DEFAULT_JWKS_CACHE_TTL_SECS) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Timeout applied to key set fetches.
    pub fn jwks_timeout(&self) -> Duration {
        Duration::from_secs(self.jwks_timeout.unwrap_or(DEFAULT_JWKS_TIMEOUT_SECS))
    }

    /// Pool ceiling, never below one.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE).max(1)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "MENU_API_HOST",
        "MENU_API_PORT",
        "MENU_API_JWKS_CACHE_TTL",
        "MENU_API_JWKS_TIMEOUT",
        "MENU_API_POOL_MAX_SIZE",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), DEFAULT_PORT);
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.jwks_cache_ttl(), Some(Duration::from_secs(300)));
        assert_eq!(settings.jwks_timeout(), Duration::from_secs(10));
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("MENU_API_HOST", Some("127.0.0.1".to_owned())),
            ("MENU_API_PORT", Some("9090".to_owned())),
            ("MENU_API_JWKS_CACHE_TTL", Some("0".to_owned())),
            ("MENU_API_JWKS_TIMEOUT", Some("3".to_owned())),
            ("MENU_API_POOL_MAX_SIZE", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override address"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.jwks_cache_ttl(), None);
        assert_eq!(settings.jwks_timeout(), Duration::from_secs(3));
        assert_eq!(settings.pool_max_size(), 4);
    }

    #[rstest]
    fn pool_size_never_drops_to_zero() {
        let settings = ServerSettings {
            host: None,
            port: None,
            jwks_cache_ttl: None,
            jwks_timeout: None,
            pool_max_size: Some(0),
        };
        assert_eq!(settings.pool_max_size(), 1);
    }
}
