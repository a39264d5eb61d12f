//! Route generation subsystem.
//!
//! # Data Flow
//! ```text
//! JSON document + prefix
//!     → traverse.rs (depth-first walk, node before children)
//!     → route.rs (Route, ParamSpec, RouteCatalogue)
//!     → RouteCatalogue (ordered, immutable)
//! ```
//!
//! # Design Decisions
//! - Only arrays and objects produce routes
//! - Collections (arrays whose first element is an array/object) get CRUD routes
//! - Nested structure under a collection comes from its first element only
//! - Catalogue order is match precedence

pub mod route;
pub mod traverse;

pub use route::{HttpMethod, ParamSpec, Route, RouteCatalogue, UnsupportedMethod};
pub use traverse::{generate_routes, ID_SEGMENT};

/// Strip trailing slashes so the prefix never ends with `/`.
pub fn normalize_prefix(prefix: &str) -> String {
    prefix.trim_end_matches('/').to_string()
}
