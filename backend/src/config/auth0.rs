//! Identity provider settings.

use mockable::Env;

use super::{ConfigError, required};

const DOMAIN_ENV: &str = "AUTH0_DOMAIN";
const AUDIENCE_ENV: &str = "AUTH0_AUDIENCE";

/// Tenant domain and API audience used to verify bearer tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auth0Settings {
    /// Host serving `/.well-known/jwks.json`, e.g. `tenant.eu.auth0.com`.
    pub domain: String,
    /// Value every accepted token must carry in `aud`.
    pub audience: String,
}

/// Read [`Auth0Settings`] from `AUTH0_DOMAIN` and `AUTH0_AUDIENCE`.
///
/// Neither has a default.
///
/// # Errors
/// [`ConfigError::MissingEnv`] when either variable is missing or blank.
///
/// # Examples
/// ```
/// use menu_backend::config::auth0_settings_from_env;
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "AUTH0_DOMAIN" => Some("tenant.auth0.com".to_owned()),
///     "AUTH0_AUDIENCE" => Some("https://menu-api".to_owned()),
///     _ => None,
/// });
///
/// let settings = auth0_settings_from_env(&env).unwrap();
/// assert_eq!(settings.domain, "tenant.auth0.com");
/// ```
pub fn auth0_settings_from_env<E: Env>(env: &E) -> Result<Auth0Settings, ConfigError> {
    Ok(Auth0Settings {
        domain: required(env, DOMAIN_ENV)?,
        audience: required(env, AUDIENCE_ENV)?,
    })
}
