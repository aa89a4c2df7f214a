use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Outcome of a previous store lookup, kept until `expires_at`.
/// `resolved: None` is a cached negative: the hostname is known not to map
/// to an active tenant domain.
#[derive(Debug, Clone)]
struct CacheEntry {
    resolved: Option<String>,
    expires_at: Instant,
}

/// Process-local TTL cache for hostname resolutions.
///
/// Positive and negative outcomes are cached alike, so a hammered unknown
/// hostname cannot turn into one store query per request. An entry past its
/// TTL is treated as absent and dropped on access; `purge_expired` handles
/// the rest from a periodic sweep. Writes are last-write-wins per key.
pub struct ResolutionCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResolutionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Unexpired cached outcome for `hostname`, if any.
    ///
    /// `Some(Some(slug))` is a positive hit, `Some(None)` a negative hit,
    /// `None` a miss (including entries that just expired).
    pub async fn get(&self, hostname: &str) -> Option<Option<String>> {
        {
            let entries = self.entries.read().await;
            match entries.get(hostname) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.resolved.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: drop it so the map does not accumulate dead hostnames.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(hostname) {
            if entry.expires_at > Instant::now() {
                // Refreshed by a concurrent writer between the two locks.
                return Some(entry.resolved.clone());
            }
            entries.remove(hostname);
        }
        None
    }

    /// Record a lookup outcome for `hostname`.
    pub async fn insert(&self, hostname: String, resolved: Option<String>) {
        let entry = CacheEntry {
            resolved,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.write().await.insert(hostname, entry);
    }

    /// Drop every expired entry, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
