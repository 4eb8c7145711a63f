//! Filesystem Storage Medium
//!
//! One-JSON-file-per-key medium for hosts with a writable directory. Keys are
//! used directly as file stems, so they must be valid path components (the
//! durable store's namespaced keys are).

use std::fs;
use std::path::PathBuf;

use crate::error::{CacheError, Result};
use crate::medium::StorageMedium;

// == File Medium ==
/// Key-value medium storing each entry as `<dir>/<key>.json`.
///
/// The medium contract only knows one failure mode, so any rejected write
/// (disk full, permissions, missing volume) surfaces as `QuotaExceeded`.
#[derive(Debug, Clone)]
pub struct FileMedium {
    dir: PathBuf,
}

impl FileMedium {
    /// Creates a medium rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageMedium for FileMedium {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .and_then(|_| fs::write(self.path_for(key), value))
            .map_err(|e| CacheError::QuotaExceeded(format!("{}: {}", key, e)))
    }

    fn remove(&mut self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }

    fn keys(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        entries
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    path.file_stem().map(|s| s.to_string_lossy().into_owned())
                } else {
                    None
                }
            })
            .collect()
    }
}
