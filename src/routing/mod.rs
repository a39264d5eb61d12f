//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Simulated request (method, path segments)
//!     → router.rs (scan routes in catalogue order)
//!     → matcher.rs (positional template match, parameter binding)
//!     → Return: RouteMatch { route, params } or None
//!
//! Route Compilation (at initialize):
//!     RouteCatalogue
//!     → Strip prefix, split templates into segments
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled once, immutable afterwards
//! - No regex in the matching path
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by catalogue position)

pub mod matcher;
pub mod router;

pub use matcher::{split_segments, PathParams, Segment, UrlTemplate};
pub use router::{RouteMatch, Router};
