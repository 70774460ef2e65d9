//! Wire format of a JSON Web Key Set and its decoding into domain keys.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use tracing::debug;

use crate::domain::ports::{KeyResolverError, KeySet, VerificationKey};

#[derive(Debug, Deserialize)]
struct JwksDto {
    #[serde(default)]
    keys: Vec<JwkDto>,
}

#[derive(Debug, Deserialize)]
struct JwkDto {
    kty: String,
    #[serde(rename = "use")]
    key_use: Option<String>,
    kid: Option<String>,
    n: Option<String>,
    e: Option<String>,
}

impl JwkDto {
    fn signs(&self) -> bool {
        self.kty == "RSA" && self.key_use.as_deref().is_none_or(|key_use| key_use == "sig")
    }
}

/// Decode a JWKS document.
///
/// Only RSA signing keys with a `kid` are kept. An entry whose modulus or
/// exponent is missing or not unpadded base64url is set aside on its own:
/// lookups for its `kid` fail while its siblings still resolve. Only an
/// unparseable document fails as a whole.
pub(crate) fn decode_key_set(body: &[u8]) -> Result<KeySet, KeyResolverError> {
    let document: JwksDto = serde_json::from_slice(body)
        .map_err(|err| KeyResolverError::fetch(format!("invalid JWKS payload: {err}")))?;

    let mut keys = Vec::new();
    let mut undecodable = Vec::new();
    for jwk in document.keys.into_iter().filter(JwkDto::signs) {
        let Some(kid) = jwk.kid else { continue };
        match (
            decode_component("n", jwk.n.as_deref()),
            decode_component("e", jwk.e.as_deref()),
        ) {
            (Ok(modulus), Ok(exponent)) => keys.push(VerificationKey {
                kid,
                modulus,
                exponent,
            }),
            (Err(reason), _) | (_, Err(reason)) => {
                debug!(%kid, %reason, "skipping undecodable JWKS entry");
                undecodable.push(kid);
            }
        }
    }

    Ok(KeySet::new(keys).with_undecodable(undecodable))
}

fn decode_component(name: &str, value: Option<&str>) -> Result<Vec<u8>, String> {
    let encoded = value.ok_or_else(|| format!("missing `{name}`"))?;
    URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|err| format!("invalid `{name}`: {err}"))
}
