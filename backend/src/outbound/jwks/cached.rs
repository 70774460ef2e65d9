//! Time-bounded key set cache.
//!
//! The whole decoded set is cached under a single entry, and concurrent
//! misses share one fetch. A lookup for a `kid` that the cached set does not
//! contain refetches so keys rotated in by the identity provider are picked
//! up before the TTL lapses, but never sooner than the minimum refetch
//! interval after the previous fetch. Unknown key ids therefore cannot drive
//! one fetch per request.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;
use tokio::sync::Mutex;
use tracing::debug;

use super::KeySetSource;
use crate::domain::ports::{KeyResolver, KeyResolverError, KeySet, VerificationKey};

/// Shortest gap between two fetches triggered by unknown key ids.
const DEFAULT_MIN_REFETCH_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug)]
struct FetchedKeys {
    keys: KeySet,
    fetched_at: Instant,
}

/// [`KeyResolver`] decorator caching the key set of a [`KeySetSource`].
pub struct CachedKeyResolver<S> {
    source: Arc<S>,
    cache: Cache<(), Arc<FetchedKeys>>,
    min_refetch_interval: Duration,
    refetch: Mutex<()>,
}

impl<S> CachedKeyResolver<S>
where
    S: KeySetSource + 'static,
{
    /// Cache `source`'s key set for `ttl`.
    pub fn new(source: Arc<S>, ttl: Duration) -> Self {
        Self {
            source,
            cache: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            min_refetch_interval: DEFAULT_MIN_REFETCH_INTERVAL,
            refetch: Mutex::new(()),
        }
    }

    /// Override the minimum gap between refetches for unknown key ids.
    #[must_use]
    pub fn with_min_refetch_interval(mut self, interval: Duration) -> Self {
        self.min_refetch_interval = interval;
        self
    }

    async fn current(&self) -> Result<Arc<FetchedKeys>, KeyResolverError> {
        let source = Arc::clone(&self.source);
        self.cache
            .try_get_with((), async move {
                let keys = source.fetch_key_set().await?;
                debug!(keys = keys.len(), "fetched JWKS");
                Ok::<_, KeyResolverError>(Arc::new(FetchedKeys {
                    keys,
                    fetched_at: Instant::now(),
                }))
            })
            .await
            .map_err(|err| KeyResolverError::clone(&err))
    }

    async fn refetch_after(
        &self,
        stale: Arc<FetchedKeys>,
    ) -> Result<Arc<FetchedKeys>, KeyResolverError> {
        if stale.fetched_at.elapsed() < self.min_refetch_interval {
            return Ok(stale);
        }

        let _guard = self.refetch.lock().await;
        if let Some(current) = self.cache.get(&()).await {
            if !Arc::ptr_eq(&current, &stale) {
                return Ok(current);
            }
        }
        self.cache.invalidate(&()).await;
        self.current().await
    }
}

#[async_trait]
impl<S> KeyResolver for CachedKeyResolver<S>
where
    S: KeySetSource + 'static,
{
    async fn resolve(&self, kid: &str) -> Result<VerificationKey, KeyResolverError> {
        let fetched = self.current().await?;
        match fetched.keys.lookup(kid) {
            Err(KeyResolverError::KeyNotFound { .. }) => {
                debug!(kid, "kid absent from cached JWKS");
            }
            resolved => return resolved,
        }

        self.refetch_after(fetched).await?.keys.lookup(kid)
    }
}
