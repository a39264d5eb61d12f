//! Simulator failure taxonomy.

use serde_json::{json, Value};
use thiserror::Error;

/// Every way a simulated request can fail.
///
/// These never escape [`crate::simulator::ApiSimulator::request`]; they are
/// turned into a `{status, data: {error}}` response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulatorError {
    #[error("URL must start with {prefix}")]
    PrefixMismatch { prefix: String },

    #[error("Route not found")]
    RouteNotFound,

    #[error("Resource not found")]
    ResourceNotFound,

    #[error("Item not found")]
    ItemNotFound,

    #[error("Method not supported: {0}")]
    MethodNotSupported(String),

    #[error("Request body required")]
    MissingBody,

    #[error("ID required")]
    MissingId,

    #[error("Target resource is not a collection")]
    NotACollection,
}

impl SimulatorError {
    /// HTTP status carried by the error response.
    pub fn status(&self) -> u16 {
        match self {
            SimulatorError::PrefixMismatch { .. }
            | SimulatorError::RouteNotFound
            | SimulatorError::ResourceNotFound
            | SimulatorError::ItemNotFound => 404,
            SimulatorError::MethodNotSupported(_) => 405,
            SimulatorError::MissingBody
            | SimulatorError::MissingId
            | SimulatorError::NotACollection => 400,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

pub type SimulatorResult<T> = Result<T, SimulatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(SimulatorError::RouteNotFound.status(), 404);
        assert_eq!(SimulatorError::MethodNotSupported("PATCH".into()).status(), 405);
        assert_eq!(SimulatorError::NotACollection.status(), 400);
    }

    #[test]
    fn test_prefix_error_names_prefix() {
        let err = SimulatorError::PrefixMismatch {
            prefix: "/api".into(),
        };
        assert_eq!(err.to_json(), json!({"error": "URL must start with /api"}));
    }
}
