//! Error types for the cache library
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache library.
///
/// Only `Unavailable` is expected to reach an end-user-facing layer. `Parse`
/// failures are recovered internally (the offending record is treated as
/// absent), and `QuotaExceeded` is returned only after the durable store's
/// built-in eviction-and-retry has failed.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Durable write rejected by the storage medium, after eviction and retry
    #[error("Storage quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Stored data was unreadable or corrupt
    #[error("Unreadable stored data: {0}")]
    Parse(String),

    /// No network result and no cached or default value to fall back on
    #[error("No data available for key: {0}")]
    Unavailable(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache library.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CacheError::Unavailable("hostels".to_string());
        assert_eq!(err.to_string(), "No data available for key: hostels");

        let err = CacheError::QuotaExceeded("payload too large".to_string());
        assert!(err.to_string().contains("quota exceeded"));
    }
}
