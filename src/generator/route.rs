//! Route catalogue types.
//!
//! These are pure metadata: nothing here is enforced against request bodies.
//! The serialized shape (`method`, `url`, `description`, `responseExample`,
//! `params`) is the one stored by the documentation store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four methods a generated route can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a method name is not one of GET/POST/PUT/DELETE.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported method: {0}")]
pub struct UnsupportedMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnsupportedMethod;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(UnsupportedMethod(s.to_string())),
        }
    }
}

/// Documentation for a single route parameter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub required: bool,
}

impl ParamSpec {
    pub fn id(description: &str) -> Self {
        Self {
            name: "id".to_string(),
            kind: "string/number".to_string(),
            description: description.to_string(),
            required: true,
        }
    }

    pub fn body(description: &str) -> Self {
        Self {
            name: "body".to_string(),
            kind: "object".to_string(),
            description: description.to_string(),
            required: true,
        }
    }
}

/// One synthesized endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub method: HttpMethod,

    /// Prefixed URL template; `{name}` segments are wildcards.
    #[serde(rename = "url")]
    pub url_template: String,

    pub description: String,

    /// Pretty-printed sample response.
    pub response_example: String,

    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

/// Ordered set of routes generated for one document/prefix pair.
///
/// Order is match precedence: the simulator picks the first route that fits.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RouteCatalogue {
    routes: Vec<Route>,
}

impl RouteCatalogue {
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn as_slice(&self) -> &[Route] {
        &self.routes
    }

    /// Position of the first route with this method and template.
    pub fn position(&self, method: HttpMethod, url_template: &str) -> Option<usize> {
        self.routes
            .iter()
            .position(|r| r.method == method && r.url_template == url_template)
    }
}

impl From<Vec<Route>> for RouteCatalogue {
    fn from(routes: Vec<Route>) -> Self {
        Self { routes }
    }
}

impl<'a> IntoIterator for &'a RouteCatalogue {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
