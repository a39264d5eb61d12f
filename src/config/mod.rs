//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MockConfig (validated, immutable)
//!
//! source document (JSON)
//!     → loader.rs (read & parse, key order preserved)
//!     → watcher.rs re-parses on change when `api.watch` is set
//!     → server regenerates routes and reinitializes the session
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::MockConfig;
pub use schema::{ApiConfig, DocsBackendKind, DocsConfig, ListenerConfig, ObservabilityConfig};
pub use loader::{load_config, load_document, ConfigError, DocumentError};
