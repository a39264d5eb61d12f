//! Documentation persistence service.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::docs::backend::StorageBackend;
use crate::generator::RouteCatalogue;

/// Fixed key the blob is stored under.
pub const DOCUMENTATION_KEY: &str = "api-documentation";

/// Everything needed to redisplay a generated API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Documentation {
    pub routes: RouteCatalogue,
    pub api_prefix: String,
    pub json_structure: Value,
    /// Milliseconds since the UNIX epoch, stamped by [`DocumentationStore::save`].
    pub timestamp: u64,
}

impl Documentation {
    pub fn new(routes: RouteCatalogue, api_prefix: impl Into<String>, json_structure: Value) -> Self {
        Self {
            routes,
            api_prefix: api_prefix.into(),
            json_structure,
            timestamp: 0,
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Save/load/clear the documentation blob over a pluggable backend.
///
/// Backend failures never reach the caller. They are logged as warnings;
/// writes report `false`, failed reads fall back to the last in-memory value.
#[derive(Debug)]
pub struct DocumentationStore {
    backend: Box<dyn StorageBackend>,
    current: Mutex<Documentation>,
}

impl DocumentationStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self::from_boxed(Box::new(backend))
    }

    pub fn from_boxed(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            backend,
            current: Mutex::new(Documentation::default()),
        }
    }

    /// Overwrite the stored documentation, stamping the save time.
    pub fn save(&self, docs: Documentation) -> bool {
        let docs = Documentation {
            timestamp: now_millis(),
            ..docs
        };

        let written = match serde_json::to_string(&docs) {
            Ok(blob) => match self.backend.write(DOCUMENTATION_KEY, &blob) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "Could not persist documentation");
                    false
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Could not serialize documentation");
                false
            }
        };

        if written {
            tracing::debug!(routes = docs.routes.len(), prefix = %docs.api_prefix, "Documentation saved");
        }
        *self.lock() = docs;
        written
    }

    /// Re-read the backend. A missing blob reads as empty documentation;
    /// an unreadable or corrupt one falls back to the last in-memory value.
    pub fn load(&self) -> Documentation {
        let mut current = self.lock();
        match self.backend.read(DOCUMENTATION_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Documentation>(&blob) {
                Ok(docs) => *current = docs,
                Err(e) => tracing::warn!(error = %e, "Stored documentation is corrupt, using last known value"),
            },
            Ok(None) => *current = Documentation::default(),
            Err(e) => tracing::warn!(error = %e, "Could not load documentation, using last known value"),
        }
        current.clone()
    }

    pub fn clear(&self) -> bool {
        *self.lock() = Documentation::default();
        match self.backend.remove(DOCUMENTATION_KEY) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Could not clear stored documentation");
                false
            }
        }
    }

    /// True iff the stored catalogue is non-empty.
    pub fn exists(&self) -> bool {
        !self.load().routes.is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Documentation> {
        self.current.lock().expect("documentation mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::backend::{FileBackend, MemoryBackend, StorageError, StorageResult};
    use crate::generator::generate_routes;
    use serde_json::json;

    fn sample_docs() -> Documentation {
        let doc = json!({"users": [{"id": 1, "name": "Ann"}]});
        Documentation::new(generate_routes(&doc, "/api"), "/api", doc)
    }

    #[test]
    fn test_save_and_load() {
        let backend = MemoryBackend::new();
        let store = DocumentationStore::new(backend.clone());
        assert!(!store.exists());

        assert!(store.save(sample_docs()));
        let loaded = store.load();
        assert_eq!(loaded.api_prefix, "/api");
        assert_eq!(loaded.routes, sample_docs().routes);
        assert!(loaded.timestamp > 0);
        assert!(store.exists());

        // The blob really is in the backend.
        let blob = backend.read(DOCUMENTATION_KEY).unwrap().unwrap();
        let raw: Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(raw["apiPrefix"], "/api");
        assert_eq!(raw["routes"][0]["url"], "/api");
    }

    #[test]
    fn test_load_observes_other_writers() {
        let backend = MemoryBackend::new();
        let writer = DocumentationStore::new(backend.clone());
        let reader = DocumentationStore::new(backend);

        writer.save(sample_docs());
        assert!(reader.exists());

        writer.clear();
        assert!(!reader.exists());
    }

    #[test]
    fn test_clear() {
        let store = DocumentationStore::new(MemoryBackend::new());
        store.save(sample_docs());
        assert!(store.clear());
        assert_eq!(store.load(), Documentation::default());
    }

    #[test]
    fn test_quota_failure_is_swallowed() {
        let store = DocumentationStore::new(MemoryBackend::with_quota(8));
        assert!(!store.save(sample_docs()));
        // Nothing was persisted, so there is nothing to read back.
        assert_eq!(store.load(), Documentation::default());
        assert!(!store.exists());
    }

    #[test]
    fn test_clear_by_other_store_empties_cached_copy() {
        let backend = MemoryBackend::new();
        let writer = DocumentationStore::new(backend.clone());
        let reader = DocumentationStore::new(backend);

        writer.save(sample_docs());
        assert_eq!(reader.load().api_prefix, "/api");

        writer.clear();
        assert_eq!(reader.load(), Documentation::default());
        assert!(!reader.exists());
    }

    #[derive(Debug)]
    struct BrokenBackend;

    impl StorageBackend for BrokenBackend {
        fn read(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Unavailable("offline".into()))
        }
        fn write(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("offline".into()))
        }
        fn remove(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn test_unavailable_backend() {
        let store = DocumentationStore::new(BrokenBackend);
        assert!(!store.save(sample_docs()));
        assert_eq!(store.load().routes.len(), sample_docs().routes.len());
        assert!(!store.clear());
        assert!(!store.exists());
    }

    #[test]
    fn test_corrupt_blob_falls_back() {
        let backend = MemoryBackend::new();
        let store = DocumentationStore::new(backend.clone());
        store.save(sample_docs());

        backend.write(DOCUMENTATION_KEY, "not json").unwrap();
        assert_eq!(store.load().api_prefix, "/api");
    }

    #[test]
    fn test_file_backend_persists_across_stores() {
        let dir = std::env::temp_dir().join(format!("mock-docs-store-{}", std::process::id()));
        DocumentationStore::new(FileBackend::new(&dir)).save(sample_docs());

        let reopened = DocumentationStore::new(FileBackend::new(&dir));
        assert!(reopened.exists());
        assert_eq!(reopened.load().json_structure, sample_docs().json_structure);

        std::fs::remove_dir_all(&dir).unwrap_or_default();
    }
}
