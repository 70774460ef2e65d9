//! JWT verification against keys published by the identity provider.
//!
//! The header is decoded without trust to pick the algorithm and key id.
//! Signature checking is delegated to `jsonwebtoken`; its built-in claim
//! validation is disabled so expiry, audience and subject are checked here
//! against an injected clock.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use mockable::Clock;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::AuthError;
use crate::domain::ports::KeyResolver;
use crate::domain::{Subject, SubjectValidationError};

/// Accepted `alg` header values.
pub const SUPPORTED_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];

type Claims = Map<String, Value>;

#[derive(Debug, Deserialize)]
struct UntrustedHeader {
    alg: String,
    #[serde(default)]
    kid: Option<String>,
}

/// Verifies bearer tokens and extracts their subject.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: Arc<dyn KeyResolver>,
    audience: String,
    clock: Arc<dyn Clock>,
}

impl TokenVerifier {
    /// Build a verifier accepting tokens for `audience`.
    pub fn new(
        keys: Arc<dyn KeyResolver>,
        audience: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            keys,
            audience: audience.into(),
            clock,
        }
    }

    /// Verify a raw `Authorization` header value.
    ///
    /// # Errors
    /// Returns the first failing check as an [`AuthError`].
    pub async fn verify_header(&self, authorization: Option<&str>) -> Result<Subject, AuthError> {
        let token = bearer_token(authorization)?;
        self.verify_token(token).await
    }

    /// Verify a bare token.
    ///
    /// # Errors
    /// Returns the first failing check as an [`AuthError`].
    pub async fn verify_token(&self, token: &str) -> Result<Subject, AuthError> {
        let (algorithm, kid) = read_header(token)?;
        let key = self.keys.resolve(&kid).await?;
        let decoding_key = DecodingKey::from_rsa_raw_components(&key.modulus, &key.exponent);

        let claims = decode_claims(token, &decoding_key, algorithm)?;
        self.check_expiry(&claims)?;
        self.check_audience(&claims)?;
        subject(&claims)
    }

    fn check_expiry(&self, claims: &Claims) -> Result<(), AuthError> {
        let exp = claims
            .get("exp")
            .and_then(expiry_seconds)
            .ok_or(AuthError::TokenExpired)?;
        let now = self.clock.utc().timestamp();
        // The expiry instant itself is already expired.
        if exp <= now {
            return Err(AuthError::TokenExpired);
        }
        Ok(())
    }

    fn check_audience(&self, claims: &Claims) -> Result<(), AuthError> {
        let matches = |value: &Value| value.as_str() == Some(self.audience.as_str());
        match claims.get("aud") {
            None | Some(Value::Null) => Err(AuthError::MissingAudience),
            Some(Value::Array(values)) if values.iter().any(matches) => Ok(()),
            Some(value) if matches(value) => Ok(()),
            Some(_) => Err(AuthError::InvalidAudience),
        }
    }
}

/// A NumericDate rounded up to whole seconds.
///
/// Against an integer clock, `ceil(exp) > now` holds exactly when `exp > now`.
fn expiry_seconds(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(seconds) = number.as_i64() {
        return Some(seconds);
    }
    if number.as_u64().is_some() {
        return Some(i64::MAX);
    }
    let whole = number.as_f64()?.ceil();
    if whole >= I64_LIMIT {
        return Some(i64::MAX);
    }
    if whole < -I64_LIMIT {
        return None;
    }
    whole.to_string().parse().ok()
}

/// `2^63` as an `f64`, the first value past `i64::MAX`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthError> {
    let header = authorization.ok_or(AuthError::MalformedHeader)?;
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}

fn read_header(token: &str) -> Result<(Algorithm, String), AuthError> {
    let mut segments = token.split('.');
    let (Some(encoded), Some(_), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::MalformedToken);
    };
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|_| AuthError::MalformedToken)?;
    let header: UntrustedHeader =
        serde_json::from_slice(&bytes).map_err(|_| AuthError::MalformedToken)?;

    let algorithm = match header.alg.as_str() {
        "RS256" => Algorithm::RS256,
        "RS384" => Algorithm::RS384,
        "RS512" => Algorithm::RS512,
        _ => return Err(AuthError::UnsupportedAlgorithm { alg: header.alg }),
    };
    let kid = header.kid.ok_or(AuthError::MissingKeyId)?;
    Ok((algorithm, kid))
}

fn decode_claims(
    token: &str,
    key: &DecodingKey,
    algorithm: Algorithm,
) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(algorithm);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    jsonwebtoken::decode::<Claims>(token, key, &validation)
        .map(|data| data.claims)
        .map_err(|err| match err.kind() {
            ErrorKind::Json(_) | ErrorKind::Base64(_) | ErrorKind::Utf8(_) => {
                AuthError::MalformedClaims
            }
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            other => {
                debug!(error = ?other, "token rejected during signature verification");
                AuthError::InvalidSignature
            }
        })
}

fn subject(claims: &Claims) -> Result<Subject, AuthError> {
    let raw = claims
        .get("sub")
        .and_then(Value::as_str)
        .ok_or(AuthError::MissingSubject)?;
    Subject::new(raw).map_err(|err| match err {
        SubjectValidationError::Empty => AuthError::MissingSubject,
        SubjectValidationError::TooLong { .. } => AuthError::MalformedClaims,
    })
}

#[cfg(test)]
mod tests;
