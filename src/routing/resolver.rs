use std::sync::Arc;
use std::time::Duration;

use crate::database::store::DomainStore;

use super::cache::ResolutionCache;

/// Outcome of resolving a candidate custom domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The hostname is bound to an active tenant domain.
    Found(String),
    /// No active binding, or the store could not be reached.
    NotFound,
}

/// Resolves candidate custom domains to tenant slugs through the domain
/// store, with a process-local TTL cache in front.
///
/// Concurrent misses for the same hostname may each query the store; the
/// lookup is idempotent and the cache is last-write-wins, so no
/// single-flight deduplication is done. Entries are never actively
/// invalidated; staleness after a domain changes is bounded by the TTL.
pub struct DomainResolver {
    store: Arc<dyn DomainStore>,
    cache: ResolutionCache,
}

impl DomainResolver {
    pub fn new(store: Arc<dyn DomainStore>, ttl: Duration) -> Self {
        Self {
            store,
            cache: ResolutionCache::new(ttl),
        }
    }

    /// Look up the tenant slug bound to `hostname`.
    ///
    /// Never fails the request path: store errors degrade to `NotFound`
    /// and are negatively cached so a struggling store is not hammered.
    pub async fn resolve(&self, hostname: &str) -> Resolution {
        if let Some(cached) = self.cache.get(hostname).await {
            tracing::debug!(hostname, positive = cached.is_some(), "resolution cache hit");
            return match cached {
                Some(slug) => Resolution::Found(slug),
                None => Resolution::NotFound,
            };
        }

        let resolved = match self.store.find_active_domain(hostname).await {
            Ok(Some(domain)) => Some(domain.slug),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(
                    hostname,
                    error = %e,
                    "domain store lookup failed, treating as not found"
                );
                None
            }
        };

        self.cache
            .insert(hostname.to_string(), resolved.clone())
            .await;

        match resolved {
            Some(slug) => {
                tracing::debug!(hostname, slug = %slug, "resolved custom domain");
                Resolution::Found(slug)
            }
            None => Resolution::NotFound,
        }
    }

    /// Drop expired cache entries. Called from the periodic sweep task.
    pub async fn purge_expired(&self) -> usize {
        self.cache.purge_expired().await
    }
}
