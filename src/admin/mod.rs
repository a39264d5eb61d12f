pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use crate::http::server::AppState;
use self::handlers::*;

/// Base path of the admin routes; never forwarded to the simulator.
pub const ADMIN_BASE: &str = "/_mock";

fn admin_path(endpoint: &str) -> String {
    format!("{ADMIN_BASE}{endpoint}")
}

pub fn setup_admin_router() -> Router<AppState> {
    Router::new()
        .route(&admin_path("/status"), get(get_status))
        .route(&admin_path("/routes"), get(get_routes))
        .route(&admin_path("/data"), get(get_data))
        .route(&admin_path("/docs"), get(get_docs).delete(clear_docs))
        .route(&admin_path("/reset"), post(reset))
}
