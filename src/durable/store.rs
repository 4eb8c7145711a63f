//! Durable Store
//!
//! Serialization layer over a [`StorageMedium`]. Reads recover from missing
//! and corrupt data by returning absence; writes recover from quota
//! exhaustion by evicting configured low-priority keys and retrying once.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{CacheError, Result};
use crate::medium::StorageMedium;

// == Durable Store ==
/// Best-effort persistence over a shared, quota-limited medium.
pub struct DurableStore {
    medium: Box<dyn StorageMedium>,
    /// Serialized-size threshold above which a write logs a warning
    size_warn_bytes: usize,
    /// Low-priority keys evicted when the medium rejects a write
    evict_on_quota: Vec<String>,
}

impl DurableStore {
    // == Constructor ==
    /// Creates a store over `medium`.
    ///
    /// # Arguments
    /// * `medium` - The underlying key-value substrate
    /// * `size_warn_bytes` - Soft threshold for the oversized-write warning
    /// * `evict_on_quota` - Keys sacrificed when a write hits the quota
    pub fn new(
        medium: Box<dyn StorageMedium>,
        size_warn_bytes: usize,
        evict_on_quota: Vec<String>,
    ) -> Self {
        Self {
            medium,
            size_warn_bytes,
            evict_on_quota,
        }
    }

    // == Write ==
    /// Serializes `value` and stores it under `key`.
    ///
    /// Oversized payloads are logged and still attempted. If the medium
    /// reports quota exhaustion, the configured low-priority keys are
    /// evicted and the write retried once.
    ///
    /// # Errors
    /// Returns [`CacheError::QuotaExceeded`] when the retry also fails, and
    /// [`CacheError::Parse`] when `value` cannot be serialized. Never panics.
    pub fn write<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| CacheError::Parse(format!("{}: {}", key, e)))?;

        if raw.len() > self.size_warn_bytes {
            warn!(
                key,
                size = raw.len(),
                threshold = self.size_warn_bytes,
                "storing oversized value"
            );
        }

        match self.medium.set(key, &raw) {
            Ok(()) => Ok(()),
            Err(_) => {
                warn!(key, "medium rejected write, evicting low-priority keys");
                for low_priority in &self.evict_on_quota {
                    self.medium.remove(low_priority);
                }
                self.medium.set(key, &raw)
            }
        }
    }

    // == Read ==
    /// Reads and deserializes the value stored under `key`.
    ///
    /// Missing data returns `None`; unreadable data is logged and also
    /// returns `None`. Never panics or surfaces an error.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.medium.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                let err = CacheError::Parse(format!("{}: {}", key, e));
                warn!(key, error = %err, "discarding unreadable record");
                None
            }
        }
    }

    /// Reads the value stored under `key`, or `fallback` when it is missing
    /// or unreadable.
    pub fn read_or<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        self.read(key).unwrap_or(fallback)
    }

    // == Remove ==
    /// Removes `key`. Idempotent; no error if the key is absent.
    pub fn remove(&mut self, key: &str) {
        self.medium.remove(key);
    }

    // == Keys With Prefix ==
    /// Returns the stored keys matching `prefix`.
    ///
    /// The sequence is a snapshot recomputed on each call, not a live view.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .medium
            .keys()
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect();
        keys.sort();
        debug!(prefix, count = keys.len(), "enumerated namespaced keys");
        keys
    }
}

impl std::fmt::Debug for DurableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurableStore")
            .field("size_warn_bytes", &self.size_warn_bytes)
            .field("evict_on_quota", &self.evict_on_quota)
            .finish_non_exhaustive()
    }
}
