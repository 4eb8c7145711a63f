//! Fetch-with-Fallback Orchestration
//!
//! Composes the expiring cache with a caller-supplied remote fetch: try the
//! network once, cache on success, degrade to the cached value or a default
//! on failure. This is the single entry point replacing ad hoc
//! fallback-to-storage logic in loading code.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::ExpiringCache;
use crate::error::{CacheError, Result};

// == Source Tag ==
/// Where a fetched value came from.
///
/// Callers showing a stale-data indicator branch on this; it is informational
/// and carries no other semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Fresh result from the remote fetch
    Network,
    /// Previously cached value served after a fetch failure
    Cache,
    /// Caller-supplied default served after a fetch failure with no cache
    Default,
}

// == Fetched Value ==
/// A value paired with the source that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    /// The resolved value
    pub value: T,
    /// Where the value came from
    pub source: Source,
}

// == Fetch Options ==
/// Per-call options for [`fetch_with_fallback`].
#[derive(Debug, Clone)]
pub struct FetchOptions<T> {
    /// TTL for a successfully fetched value (cache default if None)
    pub ttl: Option<Duration>,
    /// Value served when both the fetch and the cache come up empty
    pub default: Option<T>,
}

impl<T> Default for FetchOptions<T> {
    fn default() -> Self {
        Self {
            ttl: None,
            default: None,
        }
    }
}

impl<T> FetchOptions<T> {
    /// Sets the TTL applied on a successful fetch.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Sets the value of last resort.
    pub fn default_value(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }
}

// == Fetch With Fallback ==
/// Attempts `remote_fetch` once; caches and returns its result on success,
/// otherwise degrades to the cached value, then to the configured default.
///
/// The cache write happens only after the fetch has fully resolved, so a
/// timeout or mid-flight failure never leaves a partial entry behind. No
/// retries are performed here and concurrent calls for the same key are not
/// coalesced; callers wanting either layer them into `remote_fetch`.
///
/// # Errors
/// Returns [`CacheError::Unavailable`] when the fetch fails, no live cache
/// entry exists, and no default is configured.
pub async fn fetch_with_fallback<T, F, Fut>(
    cache: &RwLock<ExpiringCache>,
    key: &str,
    remote_fetch: F,
    options: FetchOptions<T>,
) -> Result<Fetched<T>>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    match remote_fetch().await {
        Ok(value) => {
            cache.write().await.set(key, &value, options.ttl);
            debug!(key, "remote fetch succeeded");
            Ok(Fetched {
                value,
                source: Source::Network,
            })
        }
        Err(e) => {
            warn!(key, error = %e, "remote fetch failed, falling back");

            if let Some(value) = cache.write().await.get::<T>(key) {
                return Ok(Fetched {
                    value,
                    source: Source::Cache,
                });
            }

            match options.default {
                Some(value) => Ok(Fetched {
                    value,
                    source: Source::Default,
                }),
                None => Err(CacheError::Unavailable(key.to_string())),
            }
        }
    }
}
