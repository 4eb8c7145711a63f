//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.
//! The same structure, serialized as JSON, is the durable record mirrored
//! to the storage medium.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

// == Cache Entry ==
/// A cached value with its creation and expiry timestamps.
///
/// Entries are replaced wholesale on overwrite, never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The stored value
    pub value: Value,
    /// When the value was cached
    pub created_at: DateTime<Utc>,
    /// When the entry stops being served
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now.
    pub fn new(value: Value, ttl: Duration) -> Self {
        let now = Utc::now();
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        Self {
            value,
            created_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired when the current time is
    /// greater than or equal to its expiration time, so it is unservable the
    /// instant the TTL has fully elapsed.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    // == Age ==
    /// Returns the elapsed time since the entry was created.
    ///
    /// Used by the sweep to enforce the absolute retention bound. A clock
    /// that moved backwards past `created_at` reads as zero age.
    pub fn age(&self) -> Duration {
        (Utc::now() - self.created_at).to_std().unwrap_or(Duration::ZERO)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(json!({"id": 1}), Duration::from_secs(60));

        assert_eq!(entry.value, json!({"id": 1}));
        assert!(entry.expires_at > entry.created_at);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(json!("v"), Duration::from_millis(10));

        assert!(!entry.is_expired());
        sleep(Duration::from_millis(11));
        assert!(entry.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Utc::now();
        let entry = CacheEntry {
            value: json!("v"),
            created_at: now,
            expires_at: now, // Expires exactly at creation time
        };

        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }

    #[test]
    fn test_age_grows() {
        let entry = CacheEntry::new(json!("v"), Duration::from_secs(60));
        sleep(Duration::from_millis(10));
        assert!(entry.age() >= Duration::from_millis(10));
    }

    #[test]
    fn test_entry_serde_roundtrip() {
        let entry = CacheEntry::new(json!([1, 2, 3]), Duration::from_secs(60));
        let raw = serde_json::to_string(&entry).unwrap();
        let back: CacheEntry = serde_json::from_str(&raw).unwrap();

        assert_eq!(back.value, entry.value);
        assert_eq!(back.created_at, entry.created_at);
        assert_eq!(back.expires_at, entry.expires_at);
    }
}
