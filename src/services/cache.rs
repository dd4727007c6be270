//! Time-bounded memoization owned by the calling layer.

use std::hash::Hash;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Key/value cache whose entries expire after a per-entry time to live.
pub trait TtlCache<K, V>: Send + Sync {
    /// Live value for `key`, if any. Expired entries are never returned.
    fn get(&self, key: &K) -> Option<V>;

    fn insert(&self, key: K, value: V, ttl: Duration);

    fn invalidate(&self, key: &K);
}

/// Process-local `TtlCache` over a sharded concurrent map.
///
/// Every insert sweeps expired entries first, so keys that are written once
/// and never read again do not accumulate.
pub struct InMemoryTtlCache<K, V>
where
    K: Eq + Hash,
{
    entries: DashMap<K, CacheEntry<V>>,
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

impl<K, V> InMemoryTtlCache<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of stored entries, expired ones included until swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        before.saturating_sub(self.entries.len())
    }
}

impl<K, V> Default for InMemoryTtlCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> TtlCache<K, V> for InMemoryTtlCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if entry.is_live(now) {
                return Some(entry.value.clone());
            }
        }
        // The read guard above must be released before removing.
        self.entries.remove_if(key, |_, entry| !entry.is_live(now));
        None
    }

    fn insert(&self, key: K, value: V, ttl: Duration) {
        let purged = self.purge_expired();
        if purged > 0 {
            tracing::trace!(purged, "swept expired cache entries");
        }
        let expires_at = Instant::now() + ttl;
        self.entries.insert(key, CacheEntry { value, expires_at });
    }

    fn invalidate(&self, key: &K) {
        self.entries.remove(key);
    }
}
