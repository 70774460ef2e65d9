//! JSON Web Key Set adapters implementing [`KeyResolver`].
//!
//! [`HttpJwksSource`] fetches `https://{domain}/.well-known/jwks.json` on
//! every lookup. [`CachedKeyResolver`] wraps any [`KeySetSource`] and keeps
//! the decoded set for a bounded time.
//!
//! [`KeyResolver`]: crate::domain::ports::KeyResolver

mod cached;
mod dto;
mod http_source;

use async_trait::async_trait;

use crate::domain::ports::{KeyResolverError, KeySet};

pub use cached::CachedKeyResolver;
pub(crate) use dto::decode_key_set;
pub use http_source::{HttpJwksSource, JwksSourceBuildError};

/// Fetches the complete key set from wherever it is published.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeySetSource: Send + Sync {
    /// Fetch and decode the current key set.
    async fn fetch_key_set(&self) -> Result<KeySet, KeyResolverError>;
}
