//! Storage backends for the documentation blob.

use dashmap::DashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage quota exceeded: {needed} bytes needed, {limit} bytes allowed")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A string key-value store holding serialized blobs.
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// `Ok(None)` when nothing is stored under `key`.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Full overwrite.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// In-process map. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<DashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes whose total stored size would exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            quota: Some(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).map(|r| r.value().clone()))
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(limit) = self.quota {
            let others: usize = self
                .entries
                .iter()
                .filter(|r| r.key() != key)
                .map(|r| r.value().len())
                .sum();
            let needed = others + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        // Write to a sibling file first so readers never see a torn blob.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| io_error(&path, e))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}
