//! API documentation persistence.
//!
//! # Data Flow
//! ```text
//! Documentation { routes, apiPrefix, jsonStructure, timestamp }
//!     → store.rs (serialize, stamp, swallow backend errors)
//!     → backend.rs (memory map or one file per key)
//! ```
//!
//! # Design Decisions
//! - Explicit service, no process-wide global
//! - Reads always go to the backend so every reader sees the latest save
//! - Failures are warnings, never errors returned to the caller

pub mod backend;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, StorageBackend, StorageError};
pub use store::{Documentation, DocumentationStore, DOCUMENTATION_KEY};
