use std::path::{Path, PathBuf};

use moka::sync::Cache;
use tracing::warn;

use super::error::CacheError;
use super::ResponseCache;
use crate::hashing::hash_key;

const DEFAULT_HOT_CAPACITY: u64 = 10_000;

/// File-backed response cache with an in-memory front.
///
/// Every entry lives in its own file named by the BLAKE3 hex of its key, so
/// keys never touch the filesystem namespace. Reads fall through the
/// in-memory layer to disk; writes land in both. Disk I/O runs on the
/// blocking thread pool.
#[derive(Clone)]
pub struct FileCache {
    directory: PathBuf,
    hot: Cache<String, String>,
}

impl std::fmt::Debug for FileCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileCache")
            .field("directory", &self.directory)
            .finish_non_exhaustive()
    }
}

impl FileCache {
    /// Opens a cache under `directory`, creating it if needed.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Self::with_capacity(directory, DEFAULT_HOT_CAPACITY)
    }

    /// Opens a cache with a bounded in-memory layer (LRU eviction).
    pub fn with_capacity(
        directory: impl Into<PathBuf>,
        hot_capacity: u64,
    ) -> Result<Self, CacheError> {
        let directory = directory.into();

        std::fs::create_dir_all(&directory).map_err(|source| CacheError::CreateDirFailed {
            path: directory.clone(),
            source,
        })?;

        Ok(Self {
            directory,
            hot: Cache::builder().max_capacity(hot_capacity).build(),
        })
    }

    /// Directory holding the persisted entries.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(hash_key(key))
    }
}

impl ResponseCache for FileCache {
    async fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.hot.get(key) {
            return Some(value);
        }

        let path = self.path_for(key);
        let hot = self.hot.clone();
        let key = key.to_string();

        tokio::task::spawn_blocking(move || {
            let value = std::fs::read_to_string(&path).ok()?;
            hot.insert(key, value.clone());
            Some(value)
        })
        .await
        .unwrap_or_else(|e| {
            warn!("cache read task failed: {e}");
            None
        })
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.hot.insert(key.to_string(), value.to_string());

        let path = self.path_for(key);
        let value = value.to_string();

        tokio::task::spawn_blocking(move || {
            std::fs::write(&path, value).map_err(|source| CacheError::WriteFailed { path, source })
        })
        .await?
    }
}
