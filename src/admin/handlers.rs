use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use crate::docs::Documentation;
use crate::generator::RouteCatalogue;
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub prefix: String,
    pub routes: usize,
}

pub async fn get_status(
    State(state): State<AppState>,
) -> Json<SystemStatus> {
    let session = state.session();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        prefix: session.prefix().to_string(),
        routes: session.catalogue().len(),
    })
}

pub async fn get_routes(
    State(state): State<AppState>,
) -> Json<RouteCatalogue> {
    Json(state.session().catalogue().clone())
}

/// Current working copy, writes included.
pub async fn get_data(
    State(state): State<AppState>,
) -> Json<Value> {
    Json(state.session().data().clone())
}

pub async fn get_docs(
    State(state): State<AppState>,
) -> Json<Documentation> {
    Json(state.docs.load())
}

pub async fn clear_docs(
    State(state): State<AppState>,
) -> (StatusCode, Json<Value>) {
    if state.docs.clear() {
        (StatusCode::OK, Json(json!({ "success": true })))
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "success": false })))
    }
}

pub async fn reset(
    State(state): State<AppState>,
) -> Json<Value> {
    state.session().reset();
    tracing::info!("Working copy reset to source document");
    Json(json!({ "success": true }))
}
