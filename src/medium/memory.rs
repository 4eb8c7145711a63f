//! In-Memory Storage Medium
//!
//! HashMap-backed medium with a byte-capacity quota, mirroring the behavior
//! of size-limited browser storage. Used as the default medium in tests and
//! on hosts without durable storage.

use std::collections::HashMap;

use crate::error::Result;
use crate::medium::{quota_error, StorageMedium};

// == Memory Medium ==
/// In-memory key-value medium with a byte quota.
///
/// Usage accounting charges `key.len() + value.len()` per entry. A `set`
/// that would push usage past the capacity is rejected without modifying
/// the stored data.
#[derive(Debug)]
pub struct MemoryMedium {
    entries: HashMap<String, String>,
    capacity_bytes: usize,
}

impl MemoryMedium {
    /// Creates a medium with the given byte capacity.
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity_bytes,
        }
    }

    /// Creates an effectively unbounded medium.
    pub fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    /// Returns the current accounted usage in bytes.
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn fits(&self, key: &str, value: &str) -> bool {
        let replaced = self
            .entries
            .get(key)
            .map(|old| key.len() + old.len())
            .unwrap_or(0);
        let prospective = self.used_bytes() - replaced + key.len() + value.len();
        prospective <= self.capacity_bytes
    }
}

impl StorageMedium for MemoryMedium {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if !self.fits(key, value) {
            return Err(quota_error(key, value.len()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
