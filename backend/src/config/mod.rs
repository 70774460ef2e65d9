//! Runtime configuration shared by the server and migration binaries.
//!
//! - Identity provider and database settings come from plain environment
//!   variables read through [`mockable::Env`], so they can be tested with
//!   `MockEnv`.
//! - Server tuning comes from [`ServerSettings`], loaded with OrthoConfig.

mod auth0;
mod database;
mod settings;

pub use auth0::{Auth0Settings, auth0_settings_from_env};
pub use database::database_url_from_env;
pub use settings::ServerSettings;

/// Errors raised while reading environment configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

fn required<E: mockable::Env>(env: &E, name: &'static str) -> Result<String, ConfigError> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingEnv { name })
}

#[cfg(test)]
pub(crate) mod test_env {
    use std::collections::HashMap;

    use mockable::MockEnv;

    /// A `MockEnv` answering from `vars`.
    pub(crate) fn mock_env<const N: usize>(vars: [(&str, &str); N]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }
}
