//! Reqwest-backed JWKS adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping. Decoding lives in [`super::dto`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::{KeySetSource, decode_key_set};
use crate::domain::ports::{KeyResolver, KeyResolverError, KeySet, VerificationKey};

const JWKS_PATH: &str = "/.well-known/jwks.json";

/// Errors raised while constructing [`HttpJwksSource`].
#[derive(Debug, thiserror::Error)]
pub enum JwksSourceBuildError {
    /// The identity-provider domain does not form a valid URL.
    #[error("invalid identity provider domain `{domain}`: {message}")]
    InvalidDomain { domain: String, message: String },
    /// The HTTP client could not be constructed.
    #[error("failed to build JWKS HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Fetches the key set over HTTPS on every call.
pub struct HttpJwksSource {
    client: Client,
    endpoint: Url,
}

impl HttpJwksSource {
    /// Target `https://{domain}/.well-known/jwks.json`.
    ///
    /// # Errors
    /// Returns [`JwksSourceBuildError`] when the domain is not a valid host or
    /// the client cannot be built.
    pub fn for_domain(domain: &str, timeout: Duration) -> Result<Self, JwksSourceBuildError> {
        let endpoint = jwks_url(domain)?;
        Self::new(endpoint, timeout)
    }

    /// Target an explicit endpoint.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, JwksSourceBuildError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// The endpoint this source fetches.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn jwks_url(domain: &str) -> Result<Url, JwksSourceBuildError> {
    let host = domain.trim().trim_end_matches('/');
    let invalid = |message: String| JwksSourceBuildError::InvalidDomain {
        domain: domain.to_owned(),
        message,
    };
    if host.is_empty() || host.contains("://") {
        return Err(invalid("expected a bare host name".to_owned()));
    }
    Url::parse(&format!("https://{host}{JWKS_PATH}")).map_err(|err| invalid(err.to_string()))
}

#[async_trait]
impl KeySetSource for HttpJwksSource {
    async fn fetch_key_set(&self) -> Result<KeySet, KeyResolverError> {
        debug!(endpoint = %self.endpoint, "fetching JWKS");
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        decode_key_set(body.as_ref())
    }
}

#[async_trait]
impl KeyResolver for HttpJwksSource {
    async fn resolve(&self, kid: &str) -> Result<VerificationKey, KeyResolverError> {
        let keys = self.fetch_key_set().await?;
        keys.lookup(kid)
    }
}

fn map_transport_error(error: reqwest::Error) -> KeyResolverError {
    if error.is_timeout() {
        KeyResolverError::fetch(format!("JWKS request timed out: {error}"))
    } else {
        KeyResolverError::fetch(format!("JWKS request failed: {error}"))
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> KeyResolverError {
    let preview = body_preview(body);
    if preview.is_empty() {
        KeyResolverError::fetch(format!("JWKS endpoint returned status {}", status.as_u16()))
    } else {
        KeyResolverError::fetch(format!(
            "JWKS endpoint returned status {}: {preview}",
            status.as_u16()
        ))
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
