//! JSON Mock API Library
//!
//! Generates REST routes from the shape of a JSON document and simulates
//! GET/POST/PUT/DELETE requests against an in-memory copy of it.

pub mod admin;
pub mod config;
pub mod docs;
pub mod generator;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod session;
pub mod simulator;

pub use config::schema::MockConfig;
pub use generator::{generate_routes, Route, RouteCatalogue};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use session::MockSession;
pub use simulator::{ApiSimulator, SimResponse};
