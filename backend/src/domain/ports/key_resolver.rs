//! Port for resolving token signing keys by key identifier.
//!
//! Adapters fetch the identity provider's JSON Web Key Set and hand back the
//! raw RSA components; the token verifier turns them into a decoding key.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by key resolver adapters.
    pub enum KeyResolverError {
        /// No key in the published set carries the requested identifier.
        KeyNotFound { kid: String } => "no signing key with kid {kid}",
        /// The key set could not be fetched or decoded.
        Fetch { message: String } => "signing key fetch failed: {message}",
    }
}

/// RSA public key published by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationKey {
    /// Key identifier (`kid`).
    pub kid: String,
    /// Big-endian modulus bytes.
    pub modulus: Vec<u8>,
    /// Big-endian public exponent bytes.
    pub exponent: Vec<u8>,
}

/// Decoded key set, in publication order.
///
/// Identifiers of published entries that could not be decoded are kept
/// alongside, so a lookup for one of them fails as a fetch error rather than
/// as an unknown key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet {
    keys: Vec<VerificationKey>,
    undecodable: Vec<String>,
}

impl KeySet {
    /// Wrap decoded keys.
    pub fn new(keys: Vec<VerificationKey>) -> Self {
        Self {
            keys,
            undecodable: Vec::new(),
        }
    }

    /// Record identifiers whose published entry failed to decode.
    #[must_use]
    pub fn with_undecodable(mut self, kids: Vec<String>) -> Self {
        self.undecodable = kids;
        self
    }

    /// The first key whose identifier equals `kid`.
    pub fn find(&self, kid: &str) -> Option<&VerificationKey> {
        self.keys.iter().find(|key| key.kid == kid)
    }

    /// Resolve `kid` against this set.
    ///
    /// # Errors
    /// [`KeyResolverError::Fetch`] when the entry for `kid` was published but
    /// undecodable, [`KeyResolverError::KeyNotFound`] when nothing matches.
    pub fn lookup(&self, kid: &str) -> Result<VerificationKey, KeyResolverError> {
        if let Some(key) = self.find(kid) {
            return Ok(key.clone());
        }
        if self.undecodable.iter().any(|bad| bad == kid) {
            return Err(KeyResolverError::fetch(format!(
                "published key {kid} is undecodable"
            )));
        }
        Err(KeyResolverError::key_not_found(kid))
    }

    /// Number of usable keys in the set.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set holds no usable keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Resolve a verification key for a token's `kid` header.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyResolver: Send + Sync {
    /// Return the key published under `kid`.
    ///
    /// # Errors
    /// [`KeyResolverError::KeyNotFound`] when no key matches and
    /// [`KeyResolverError::Fetch`] when the key set is unavailable.
    async fn resolve(&self, kid: &str) -> Result<VerificationKey, KeyResolverError>;
}

/// Resolver backed by a fixed key set. Used by tests and local tooling.
#[derive(Debug, Clone, Default)]
pub struct StaticKeyResolver {
    keys: KeySet,
}

impl StaticKeyResolver {
    /// Serve `keys` without any network access.
    pub fn new(keys: KeySet) -> Self {
        Self { keys }
    }
}

#[async_trait]
impl KeyResolver for StaticKeyResolver {
    async fn resolve(&self, kid: &str) -> Result<VerificationKey, KeyResolverError> {
        self.keys.lookup(kid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn key(kid: &str) -> VerificationKey {
        VerificationKey {
            kid: kid.to_owned(),
            modulus: vec![0xAB],
            exponent: vec![0x01, 0x00, 0x01],
        }
    }

    #[rstest]
    #[tokio::test]
    async fn static_resolver_finds_matching_kid() {
        let resolver = StaticKeyResolver::new(KeySet::new(vec![key("a"), key("b")]));
        let found = resolver.resolve("b").await.expect("key b present");
        assert_eq!(found.kid, "b");
    }

    #[rstest]
    #[tokio::test]
    async fn static_resolver_reports_unknown_kid() {
        let resolver = StaticKeyResolver::new(KeySet::new(vec![key("a")]));
        let err = resolver.resolve("zzz").await.expect_err("unknown kid");
        assert_eq!(err, KeyResolverError::key_not_found("zzz"));
    }

    #[rstest]
    fn undecodable_entries_fail_as_fetch_errors() {
        let keys = KeySet::new(vec![key("a")]).with_undecodable(vec!["broken".to_owned()]);
        assert_eq!(keys.lookup("a"), Ok(key("a")));
        assert!(matches!(
            keys.lookup("broken"),
            Err(KeyResolverError::Fetch { .. })
        ));
        assert_eq!(keys.lookup("zzz"), Err(KeyResolverError::key_not_found("zzz")));
    }
}
