//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the source document
//! - Generate the route catalogue and initialize the session
//! - Open the documentation store and persist the generated docs
//!
//! # Design Decisions
//! - Fail fast: an unreadable document is fatal
//! - Documentation persistence failures are not (the store only warns)
//! - Listeners start last, in `main` (traffic only when ready)

use thiserror::Error;

use crate::config::{load_document, ConfigError, DocsBackendKind, DocsConfig, DocumentError, MockConfig};
use crate::docs::{DocumentationStore, FileBackend, MemoryBackend};
use crate::observability::metrics;
use crate::session::MockSession;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("source document error: {0}")]
    Document(#[from] DocumentError),
}

/// Everything the server needs, ready to serve.
#[derive(Debug)]
pub struct Bootstrap {
    pub session: MockSession,
    pub docs: DocumentationStore,
}

/// Open the documentation store the config asks for.
pub fn open_docs_store(config: &DocsConfig) -> DocumentationStore {
    match config.backend {
        DocsBackendKind::Memory => DocumentationStore::new(MemoryBackend::new()),
        DocsBackendKind::File => DocumentationStore::new(FileBackend::new(&config.path)),
    }
}

/// Load the document, generate routes, persist their documentation.
pub fn bootstrap(config: &MockConfig) -> Result<Bootstrap, StartupError> {
    let document = load_document(&config.api.data_path)?;
    let session = MockSession::new(document, &config.api.prefix);

    tracing::info!(
        data_path = ?config.api.data_path,
        prefix = %session.prefix(),
        routes = session.catalogue().len(),
        "Routes generated"
    );
    metrics::record_routes(session.catalogue().len());

    let docs = open_docs_store(&config.docs);
    docs.save(session.documentation());

    Ok(Bootstrap { session, docs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_bootstrap_generates_and_saves() {
        let data = std::env::temp_dir().join(format!("{}-startup.json", std::process::id()));
        fs::write(&data, r#"{"users": [{"id": 1, "name": "Ann"}]}"#).unwrap();

        let mut config = MockConfig::default();
        config.api.data_path = data.clone();
        config.docs.backend = DocsBackendKind::Memory;

        let Bootstrap { mut session, docs } = bootstrap(&config).unwrap();
        assert!(docs.exists());
        assert_eq!(docs.load().routes.len(), session.catalogue().len());
        assert_eq!(session.request("GET", "/api/users/1", None).status, 200);

        fs::remove_file(data).unwrap_or_default();
    }

    #[test]
    fn test_bootstrap_missing_document() {
        let mut config = MockConfig::default();
        config.api.data_path = "/nonexistent/data.json".into();
        assert!(matches!(bootstrap(&config), Err(StartupError::Document(_))));
    }
}
