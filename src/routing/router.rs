//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes in catalogue order
//! - Look up the route for a (method, path) pair
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction
//! - O(n) scan; first match wins, so catalogue order is precedence
//! - Explicit `None` rather than a silent default

use crate::generator::{HttpMethod, Route, RouteCatalogue};
use crate::routing::matcher::{PathParams, UrlTemplate};

#[derive(Debug, Clone)]
struct CompiledRoute {
    method: HttpMethod,
    template: UrlTemplate,
}

/// A successful lookup.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub index: usize,
    pub route: &'a Route,
    pub params: PathParams,
}

/// Routes compiled from a catalogue.
#[derive(Debug, Clone, Default)]
pub struct Router {
    catalogue: RouteCatalogue,
    compiled: Vec<CompiledRoute>,
}

impl Router {
    /// Compile every route of `catalogue` relative to `prefix`.
    pub fn new(catalogue: RouteCatalogue, prefix: &str) -> Self {
        let compiled = catalogue
            .iter()
            .map(|route| CompiledRoute {
                method: route.method,
                template: UrlTemplate::compile(&route.url_template, prefix),
            })
            .collect();

        Self {
            catalogue,
            compiled,
        }
    }

    pub fn catalogue(&self) -> &RouteCatalogue {
        &self.catalogue
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Find the first route for `method` whose template fits `path`.
    pub fn find(&self, method: HttpMethod, path: &[&str]) -> Option<RouteMatch<'_>> {
        let (index, compiled) = self
            .compiled
            .iter()
            .enumerate()
            .find(|(_, c)| c.method == method && c.template.matches(path))?;

        let route = self.catalogue.get(index)?;
        Some(RouteMatch {
            index,
            route,
            params: compiled.template.extract(path),
        })
    }
}
