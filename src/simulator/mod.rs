//! Request simulation subsystem.
//!
//! # Data Flow
//! ```text
//! request(method, url, body)
//!     → prefix check, strip prefix, split segments
//!     → routing::Router (first matching route, path params)
//!     → handlers.rs (GET / POST / PUT / DELETE)
//!     → resolve.rs (walk the working copy)
//!     → SimResponse { status, data }
//! ```
//!
//! # Design Decisions
//! - The working copy is a deep clone; it never aliases the caller's document
//! - Failures are values (`SimulatorError` → error response), never panics
//! - No locking here: callers that share a simulator serialize access
//!   (see `http::server`)

pub mod error;
pub mod handlers;
pub mod resolve;

use serde::Serialize;
use serde_json::Value;

use crate::generator::{normalize_prefix, HttpMethod, RouteCatalogue};
use crate::routing::{split_segments, Router};

pub use error::{SimulatorError, SimulatorResult};
pub use resolve::{id_matches, resolve};

/// Result of one simulated call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimResponse {
    pub status: u16,
    pub data: Value,
}

impl SimResponse {
    pub fn new(status: u16, data: Value) -> Self {
        Self { status, data }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<SimulatorError> for SimResponse {
    fn from(err: SimulatorError) -> Self {
        Self::new(err.status(), err.to_json())
    }
}

/// In-memory fake backend over a JSON document.
#[derive(Debug, Clone, Default)]
pub struct ApiSimulator {
    data: Value,
    router: Router,
    prefix: String,
}

impl ApiSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a working copy of `document` together with its catalogue.
    ///
    /// No cross-checking between document and routes is done.
    pub fn initialize(&mut self, document: &Value, routes: RouteCatalogue, prefix: &str) -> &mut Self {
        self.data = document.clone();
        self.prefix = normalize_prefix(prefix);
        self.router = Router::new(routes, &self.prefix);

        let collections = match &self.data {
            Value::Object(map) => map.len(),
            Value::Array(items) => items.len(),
            _ => 0,
        };
        tracing::info!(
            prefix = %self.prefix,
            collections,
            routes = self.router.len(),
            "API simulator initialized"
        );
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn catalogue(&self) -> &RouteCatalogue {
        self.router.catalogue()
    }

    /// Current state of the working copy.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Handle one simulated call. Never fails: errors become error responses.
    pub fn request(&mut self, method: &str, url: &str, body: Option<&Value>) -> SimResponse {
        match self.dispatch(method, url, body) {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(method, url, status = err.status(), error = %err, "Simulated request failed");
                err.into()
            }
        }
    }

    fn dispatch(&mut self, method: &str, url: &str, body: Option<&Value>) -> SimulatorResult<SimResponse> {
        let path = self.strip_prefix(url).ok_or_else(|| SimulatorError::PrefixMismatch {
            prefix: self.prefix.clone(),
        })?;
        tracing::debug!(method, path, "Simulating request");

        let method: HttpMethod = method
            .parse()
            .map_err(|_| SimulatorError::MethodNotSupported(method.to_string()))?;

        let segments = split_segments(path);
        let matched = self
            .router
            .find(method, &segments)
            .ok_or(SimulatorError::RouteNotFound)?;
        let params = matched.params;

        match method {
            HttpMethod::Get => handlers::handle_get(&self.data, &segments),
            HttpMethod::Post => handlers::handle_post(&mut self.data, &segments, body),
            HttpMethod::Put => handlers::handle_put(&mut self.data, &segments, &params, body),
            HttpMethod::Delete => handlers::handle_delete(&mut self.data, &segments, &params),
        }
    }

    /// The path after the prefix, without query string or fragment.
    /// `None` unless the prefix ends at a segment boundary.
    fn strip_prefix<'u>(&self, url: &'u str) -> Option<&'u str> {
        let url = url.split(['?', '#']).next().unwrap_or_default();
        let rest = url.strip_prefix(self.prefix.as_str())?;
        (rest.is_empty() || rest.starts_with('/')).then_some(rest)
    }
}
