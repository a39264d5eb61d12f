//! Generate once, initialize, then serve simulated requests.

use serde_json::Value;

use crate::docs::Documentation;
use crate::generator::{generate_routes, normalize_prefix, RouteCatalogue};
use crate::simulator::{ApiSimulator, SimResponse};

/// A generated catalogue, the simulator serving it and the untouched source.
#[derive(Debug, Clone)]
pub struct MockSession {
    source: Value,
    prefix: String,
    simulator: ApiSimulator,
}

impl MockSession {
    pub fn new(document: Value, prefix: &str) -> Self {
        let prefix = normalize_prefix(prefix);
        let mut simulator = ApiSimulator::new();
        simulator.initialize(&document, generate_routes(&document, &prefix), &prefix);

        Self {
            source: document,
            prefix,
            simulator,
        }
    }

    pub fn request(&mut self, method: &str, url: &str, body: Option<&Value>) -> SimResponse {
        self.simulator.request(method, url, body)
    }

    pub fn catalogue(&self) -> &RouteCatalogue {
        self.simulator.catalogue()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The document the catalogue was generated from.
    pub fn source(&self) -> &Value {
        &self.source
    }

    /// The current working copy, including writes.
    pub fn data(&self) -> &Value {
        self.simulator.data()
    }

    /// Blob for the documentation store.
    pub fn documentation(&self) -> Documentation {
        Documentation::new(self.catalogue().clone(), self.prefix.clone(), self.source.clone())
    }

    /// Drop every write and start again from the source document.
    pub fn reset(&mut self) {
        let routes = self.catalogue().clone();
        self.simulator.initialize(&self.source, routes, &self.prefix);
    }

    /// Replace the source document, regenerating the catalogue.
    pub fn reload(&mut self, document: Value) {
        let prefix = std::mem::take(&mut self.prefix);
        *self = Self::new(document, &prefix);
    }
}
