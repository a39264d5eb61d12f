//! Configuration and source document loading from disk.

use std::path::Path;
use std::fs;
use serde_json::Value;
use crate::config::schema::MockConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<MockConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: MockConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Error reading the JSON document routes are generated from.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and parse the source JSON document.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DocumentError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_config() {
        let path = temp_file("mock.toml", "[api]\nprefix = \"/v1\"\n");
        let config = load_config(&path).unwrap();
        assert_eq!(config.api.prefix, "/v1");
        fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let path = temp_file("bad.toml", "[timeouts]\nrequest_secs = 0\n");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().contains("timeouts.request_secs"));
        fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/mock.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_document() {
        let path = temp_file("doc.json", r#"{"b": [1], "a": {}}"#);
        let doc = load_document(&path).unwrap();
        assert_eq!(doc, json!({"b": [1], "a": {}}));
        // Key order survives parsing.
        let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
        fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn test_load_document_invalid_json() {
        let path = temp_file("broken.json", "{nope");
        assert!(matches!(load_document(&path), Err(DocumentError::Parse { .. })));
        fs::remove_file(path).unwrap_or_default();
    }
}
