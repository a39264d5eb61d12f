//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the mock server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the mock API server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MockConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Source document and route prefix.
    pub api: ApiConfig,

    /// Where generated documentation is persisted.
    pub docs: DocsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// The JSON document to mock and how its routes are prefixed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Path to the source JSON document.
    pub data_path: PathBuf,

    /// Prefix for every generated route (e.g., "/api").
    pub prefix: String,

    /// Reload the document and regenerate routes when the file changes.
    pub watch: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.json"),
            prefix: "/api".to_string(),
            watch: false,
        }
    }
}

/// Storage backend kind for generated documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocsBackendKind {
    Memory,
    File,
}

/// Documentation persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocsConfig {
    pub backend: DocsBackendKind,

    /// Directory used by the file backend.
    pub path: PathBuf,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            backend: DocsBackendKind::File,
            path: PathBuf::from(".mock-docs"),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Request hardening.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: MockConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.api.prefix, "/api");
        assert_eq!(config.docs.backend, DocsBackendKind::File);
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_partial_sections() {
        let config: MockConfig = toml::from_str(
            r#"
            [api]
            data_path = "fixtures/shop.json"
            watch = true

            [docs]
            backend = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.data_path, PathBuf::from("fixtures/shop.json"));
        assert_eq!(config.api.prefix, "/api");
        assert!(config.api.watch);
        assert_eq!(config.docs.backend, DocsBackendKind::Memory);
        assert_eq!(config.docs.path, PathBuf::from(".mock-docs"));
    }
}
