//! Expiring Cache Store
//!
//! Two-tier cache engine: an in-memory map for the hot path backed by the
//! durable store for cross-session persistence. TTL expiry is enforced at
//! read time; an independent absolute-age sweep bounds storage growth.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats};
use crate::config::Config;
use crate::durable::DurableStore;
use crate::medium::StorageMedium;

// == Expiring Cache ==
/// Two-tier cache with TTL-based expiry and explicit invalidation.
///
/// The memory map is authoritative for the current process lifetime; the
/// durable mirror is best effort. All durable records live under this
/// cache's key namespace, so unrelated keys on the shared medium are never
/// touched.
#[derive(Debug)]
pub struct ExpiringCache {
    /// Memory tier: logical key -> entry
    entries: HashMap<String, CacheEntry>,
    /// Persistent tier, shared with unrelated writers
    durable: DurableStore,
    /// Prefix applied to every durable key
    namespace: String,
    /// TTL applied when `set` receives none
    default_ttl: Duration,
    /// Performance statistics
    stats: CacheStats,
}

impl ExpiringCache {
    // == Constructor ==
    /// Creates a cache over an existing durable store.
    pub fn new(durable: DurableStore, config: &Config) -> Self {
        Self {
            entries: HashMap::new(),
            durable,
            namespace: config.namespace.clone(),
            default_ttl: config.default_ttl,
            stats: CacheStats::new(),
        }
    }

    /// Creates a cache over `medium`, building the durable store from the
    /// configuration's size threshold and eviction list.
    pub fn with_medium(medium: Box<dyn StorageMedium>, config: &Config) -> Self {
        let durable = DurableStore::new(
            medium,
            config.size_warn_bytes,
            config.evict_on_quota.clone(),
        );
        Self::new(durable, config)
    }

    /// Wraps the cache for shared use by the fetch orchestration and the
    /// background sweep task.
    pub fn into_shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }

    // == Set ==
    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// The entry replaces any previous one wholesale. The memory copy always
    /// succeeds; the durable mirror is best effort and a rejected write only
    /// logs (the cache degrades to memory-only for this entry).
    ///
    /// # Arguments
    /// * `key` - The key to store under
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL (uses the configured default if None)
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T, ttl: Option<Duration>) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "value not serializable, skipping set");
                return;
            }
        };

        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl));
        let nskey = self.namespaced(key);

        if let Err(e) = self.durable.write(&nskey, &entry) {
            warn!(key, error = %e, "durable mirror failed, keeping memory copy only");
        }
        self.entries.insert(key.to_string(), entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// Checks the memory tier first; on a miss, attempts to hydrate from the
    /// durable store. An entry whose TTL has elapsed is deleted from both
    /// tiers and reported absent. Never panics.
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                let nskey = self.namespaced(key);
                self.entries.remove(key);
                self.durable.remove(&nskey);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_expiration();
                self.stats.record_miss();
                return None;
            }

            let value = entry.value.clone();
            return self.finish_lookup(key, value);
        }

        self.hydrate(key)
    }

    /// Memory-miss path: promote a live durable record into the memory tier.
    fn hydrate<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let nskey = self.namespaced(key);
        let Some(entry) = self.durable.read::<CacheEntry>(&nskey) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_expired() {
            self.durable.remove(&nskey);
            self.stats.record_expiration();
            self.stats.record_miss();
            return None;
        }

        debug!(key, "hydrated entry from durable store");
        let value = entry.value.clone();
        self.entries.insert(key.to_string(), entry);
        self.stats.set_total_entries(self.entries.len());
        self.stats.record_hydration();
        self.finish_lookup(key, value)
    }

    /// Converts a live entry's value to the caller's type, counting the
    /// lookup as a hit or, on a shape mismatch, as a miss.
    fn finish_lookup<T: DeserializeOwned>(&mut self, key: &str, value: serde_json::Value) -> Option<T> {
        match serde_json::from_value(value) {
            Ok(value) => {
                self.stats.record_hit();
                Some(value)
            }
            Err(e) => {
                debug!(key, error = %e, "cached value does not match requested type");
                self.stats.record_miss();
                None
            }
        }
    }

    // == Invalidate ==
    /// Removes `key` from both tiers. Idempotent.
    pub fn invalidate(&mut self, key: &str) {
        let nskey = self.namespaced(key);
        self.entries.remove(key);
        self.durable.remove(&nskey);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Clear ==
    /// Removes every entry under this cache's namespace.
    ///
    /// Unrelated keys sharing the medium are left untouched.
    pub fn clear(&mut self) {
        self.entries.clear();
        for nskey in self.durable.keys_with_prefix(&self.namespace) {
            self.durable.remove(&nskey);
        }
        self.stats.set_total_entries(0);
    }

    // == Sweep ==
    /// Maintenance pass bounding both freshness and storage growth.
    ///
    /// Purges TTL-expired memory entries, then deletes every durable record
    /// under the namespace older than `max_age` regardless of its per-entry
    /// TTL. Unreadable records are deleted too, since they can never be
    /// hydrated. Intended for a background task, not the lookup path.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&mut self, max_age: Duration) -> usize {
        let mut removed = 0;

        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();
        for key in expired {
            let nskey = self.namespaced(&key);
            self.entries.remove(&key);
            self.durable.remove(&nskey);
            self.stats.record_expiration();
            removed += 1;
        }

        for nskey in self.durable.keys_with_prefix(&self.namespace) {
            let keep = self
                .durable
                .read::<CacheEntry>(&nskey)
                .is_some_and(|entry| entry.age() <= max_age);
            if !keep {
                self.durable.remove(&nskey);
                if let Some(key) = nskey.strip_prefix(&self.namespace) {
                    self.entries.remove(key);
                }
                removed += 1;
            }
        }

        self.stats.set_total_entries(self.entries.len());
        debug!(removed, "sweep pass complete");
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the memory tier.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the memory tier is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
