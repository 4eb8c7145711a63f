//! Cachefall - A two-tier expiring cache with durable fallback
//!
//! Provides an in-memory cache with TTL expiration, mirrored into a
//! quota-limited durable store for cross-session persistence, and a
//! fetch-with-fallback orchestration for degrading gracefully when a remote
//! source is unavailable.

pub mod cache;
pub mod config;
pub mod durable;
pub mod error;
pub mod fetch;
pub mod medium;
pub mod tasks;

pub use cache::{CacheEntry, CacheStats, ExpiringCache};
pub use config::Config;
pub use durable::DurableStore;
pub use error::{CacheError, Result};
pub use fetch::{fetch_with_fallback, FetchOptions, Fetched, Source};
pub use medium::{FileMedium, MemoryMedium, StorageMedium};
pub use tasks::spawn_sweep_task;
