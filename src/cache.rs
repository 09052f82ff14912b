//! Content-keyed memoization of load-and-prepare steps.
//!
//! Keyed by source path and validated against the file's modification time,
//! so an edited source file always triggers a reload. Invalidation is also
//! available explicitly. Single-threaded by design; there is no concurrent
//! writer anywhere in the pipeline.

use anyhow::{Context, Result, anyhow};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

struct CacheEntry<T> {
    modified: SystemTime,
    value: T,
}

/// A per-session memo of derived values, one per source file.
#[derive(Default)]
pub struct FileCache<T> {
    entries: HashMap<PathBuf, CacheEntry<T>>,
}

impl<T> FileCache<T> {
    pub fn new() -> Self {
        FileCache {
            entries: HashMap::new(),
        }
    }

    /// Returns the cached value for `path`, loading it with `load` if the
    /// file is new to the cache or has been modified since last load.
    ///
    /// # Errors
    ///
    /// Fails if the file's metadata cannot be read or if `load` fails.
    pub fn get_or_load<F>(&mut self, path: &Path, load: F) -> Result<&T>
    where
        F: FnOnce(&Path) -> Result<T>,
    {
        let modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .with_context(|| format!("failed to stat {}", path.display()))?;

        let stale = self
            .entries
            .get(path)
            .is_none_or(|entry| entry.modified != modified);

        if stale {
            debug!(path = %path.display(), "cache miss, loading");
            let value = load(path)?;
            self.entries
                .insert(path.to_path_buf(), CacheEntry { modified, value });
        } else {
            debug!(path = %path.display(), "cache hit");
        }

        self.entries
            .get(path)
            .map(|entry| &entry.value)
            .ok_or_else(|| anyhow!("cache entry for {} disappeared", path.display()))
    }

    /// Drops the cached value for one path.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    /// Drops every cached value.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
