//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → admin routes (/_mock/...) or simulator catch-all
//!     → request.rs (request ID, JSON body, target)
//!     → session.request(method, target, body)
//!     → response.rs (status + JSON body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
