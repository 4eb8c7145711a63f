//! Retention Sweep Task
//!
//! Background task that periodically runs the cache's maintenance sweep.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ExpiringCache;

/// Spawns a background task that periodically sweeps the cache.
///
/// Each pass purges TTL-expired memory entries and deletes durable records
/// older than `max_age`, keeping stored data bounded independently of
/// per-entry TTLs. The task runs in an infinite loop, sleeping for the
/// configured interval between passes, and acquires a write lock on the
/// cache for each pass.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `interval` - Time between sweep passes (typically daily)
/// * `max_age` - Absolute retention bound for durable records
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = ExpiringCache::with_medium(medium, &config).into_shared();
/// let sweep_handle = spawn_sweep_task(
///     cache.clone(),
///     config.sweep_interval,
///     config.sweep_max_age,
/// );
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(
    cache: Arc<RwLock<ExpiringCache>>,
    interval: Duration,
    max_age: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting retention sweep task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            // Acquire write lock and sweep
            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.sweep(max_age)
            };

            // Log sweep statistics
            if removed > 0 {
                info!("Retention sweep: removed {} entries", removed);
            } else {
                debug!("Retention sweep: nothing to remove");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::medium::MemoryMedium;

    fn shared_cache() -> Arc<RwLock<ExpiringCache>> {
        ExpiringCache::with_medium(Box::new(MemoryMedium::unbounded()), &Config::default())
            .into_shared()
    }

    #[tokio::test]
    async fn test_sweep_task_removes_expired_entries() {
        let cache = shared_cache();

        // Add an entry with very short TTL
        {
            let mut cache_guard = cache.write().await;
            cache_guard.set("expire_soon", &"value", Some(Duration::from_millis(50)));
        }

        // Spawn sweep task with a short interval
        let handle = spawn_sweep_task(
            cache.clone(),
            Duration::from_millis(100),
            Duration::from_secs(3600),
        );

        // Wait for the entry to expire and a pass to run
        tokio::time::sleep(Duration::from_millis(250)).await;

        {
            let cache_guard = cache.read().await;
            assert!(
                cache_guard.is_empty(),
                "Expired entry should have been swept"
            );
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_valid_entries() {
        let cache = shared_cache();

        {
            let mut cache_guard = cache.write().await;
            cache_guard.set("long_lived", &"value", Some(Duration::from_secs(3600)));
        }

        let handle = spawn_sweep_task(
            cache.clone(),
            Duration::from_millis(50),
            Duration::from_secs(3600),
        );

        tokio::time::sleep(Duration::from_millis(150)).await;

        {
            let mut cache_guard = cache.write().await;
            let value: Option<String> = cache_guard.get("long_lived");
            assert_eq!(value, Some("value".to_string()));
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let cache = shared_cache();

        let handle = spawn_sweep_task(cache, Duration::from_secs(1), Duration::from_secs(3600));

        // Abort immediately
        handle.abort();

        // Wait a bit and verify task is finished
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
