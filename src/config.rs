//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default TTL applied when `set` is called without an explicit TTL
    pub default_ttl: Duration,
    /// Absolute retention bound for the periodic sweep, independent of per-entry TTL
    pub sweep_max_age: Duration,
    /// Interval between background sweep runs
    pub sweep_interval: Duration,
    /// Key prefix namespacing this cache's records on the shared medium
    pub namespace: String,
    /// Serialized-size threshold above which a durable write logs a warning
    pub size_warn_bytes: usize,
    /// Low-priority medium keys evicted when a durable write hits the quota
    pub evict_on_quota: Vec<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_TTL_MS` - Default entry TTL in milliseconds (default: 300000 = 5 minutes)
    /// - `CACHE_SWEEP_MAX_AGE_MS` - Sweep retention bound in milliseconds (default: 30 days)
    /// - `CACHE_SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 86400 = daily)
    /// - `CACHE_NAMESPACE` - Key prefix on the shared medium (default: "cache_")
    /// - `CACHE_SIZE_WARN_BYTES` - Size-warning threshold in bytes (default: 65536)
    /// - `CACHE_EVICT_ON_QUOTA` - Comma-separated low-priority keys (default: empty)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: env::var("CACHE_DEFAULT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.default_ttl),
            sweep_max_age: env::var("CACHE_SWEEP_MAX_AGE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.sweep_max_age),
            sweep_interval: env::var("CACHE_SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.sweep_interval),
            namespace: env::var("CACHE_NAMESPACE").unwrap_or(defaults.namespace),
            size_warn_bytes: env::var("CACHE_SIZE_WARN_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.size_warn_bytes),
            evict_on_quota: env::var("CACHE_EVICT_ON_QUOTA")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|k| !k.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or(defaults.evict_on_quota),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_secs(5 * 60),
            sweep_max_age: Duration::from_secs(30 * 24 * 60 * 60),
            sweep_interval: Duration::from_secs(24 * 60 * 60),
            namespace: "cache_".to_string(),
            size_warn_bytes: 64 * 1024,
            evict_on_quota: Vec::new(),
        }
    }
}
