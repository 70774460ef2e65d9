//! Bearer-token authentication.
//!
//! [`TokenVerifier`] turns an `Authorization` header into a verified
//! [`Subject`](crate::domain::Subject); [`AuthenticationService`] adds the
//! identity lookup and exposes the result through the
//! [`RequestAuthenticator`](crate::domain::ports::RequestAuthenticator) port.

mod authentication_service;
mod token_verifier;

pub use authentication_service::AuthenticationService;
pub use token_verifier::{SUPPORTED_ALGORITHMS, TokenVerifier};

use crate::domain::ports::KeyResolverError;

/// Reasons a bearer token is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Header absent, not two space-separated parts, or not `Bearer`.
    #[error("authorization header must be `Bearer <token>`")]
    MalformedHeader,
    /// The token is not three dot-separated segments with a JSON header.
    #[error("token is not a well-formed JWT")]
    MalformedToken,
    /// Only RSA signature algorithms are accepted.
    #[error("unsupported signing algorithm: {alg}")]
    UnsupportedAlgorithm { alg: String },
    /// The token header carries no `kid`.
    #[error("token header is missing a key id")]
    MissingKeyId,
    /// The signing key could not be resolved.
    #[error("signing key unavailable: {0}")]
    KeyResolution(#[from] KeyResolverError),
    /// Signature verification failed.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Claims are not a JSON object or hold an unusable value.
    #[error("token claims are malformed")]
    MalformedClaims,
    /// `exp` is absent or not in the future.
    #[error("token has expired")]
    TokenExpired,
    /// `aud` does not contain the configured audience.
    #[error("token audience is invalid")]
    InvalidAudience,
    /// `aud` is absent.
    #[error("token audience is missing")]
    MissingAudience,
    /// `sub` is absent or empty.
    #[error("token subject is missing")]
    MissingSubject,
}
