//! Authenticates requests: token verification followed by identity lookup.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use super::{AuthError, TokenVerifier};
use crate::domain::ports::{KeyResolverError, RequestAuthenticator, UserIdentity};
use crate::domain::{Error, ResolvedUser};

/// [`RequestAuthenticator`] backed by a [`TokenVerifier`] and a
/// [`UserIdentity`] port.
#[derive(Clone)]
pub struct AuthenticationService {
    verifier: TokenVerifier,
    identity: Arc<dyn UserIdentity>,
}

impl AuthenticationService {
    /// Combine a verifier with an identity resolver.
    pub fn new(verifier: TokenVerifier, identity: Arc<dyn UserIdentity>) -> Self {
        Self { verifier, identity }
    }
}

fn map_auth_error(err: AuthError) -> Error {
    match err {
        AuthError::KeyResolution(KeyResolverError::Fetch { message }) => {
            error!(%message, "signing key set unavailable");
            Error::internal(format!("signing key fetch failed: {message}"))
        }
        other => {
            debug!(reason = %other, "rejected bearer token");
            Error::unauthorized(other.to_string())
        }
    }
}

#[async_trait]
impl RequestAuthenticator for AuthenticationService {
    async fn authenticate(&self, authorization: Option<String>) -> Result<ResolvedUser, Error> {
        let subject = self
            .verifier
            .verify_header(authorization.as_deref())
            .await
            .map_err(map_auth_error)?;
        self.identity.resolve_or_create(&subject).await
    }
}
