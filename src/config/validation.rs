//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, sizes > 0)
//! - Check addresses parse and the prefix is a plain path
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MockConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::MockConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check every semantic rule, collecting all failures.
pub fn validate_config(config: &MockConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    let prefix = &config.api.prefix;
    if !prefix.is_empty() && !prefix.starts_with('/') {
        errors.push(ValidationError::new("api.prefix", "must be empty or start with '/'"));
    }
    if prefix.contains(['{', '}', '?', '#']) {
        errors.push(ValidationError::new(
            "api.prefix",
            "must not contain template or query characters",
        ));
    }

    if config.api.data_path.as_os_str().is_empty() {
        errors.push(ValidationError::new("api.data_path", "must not be empty"));
    }

    if config.docs.path.as_os_str().is_empty() {
        errors.push(ValidationError::new("docs.path", "must not be empty"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
