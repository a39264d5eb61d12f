//! Response handling and transformation.
//!
//! # Responsibilities
//! - Map simulator responses to HTTP responses (status + JSON body)
//! - Build JSON error responses for failures outside the simulator
//!
//! # Design Decisions
//! - Every body is JSON, errors included (`{"error": "..."}`)
//! - An out-of-range simulated status becomes 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::simulator::SimResponse;

impl IntoResponse for SimResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.data)).into_response()
    }
}

/// `{"error": message}` with the given status.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_carried_over() {
        let response = SimResponse::new(201, json!({"success": true, "id": 3})).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );
    }

    #[test]
    fn test_error_response() {
        let response = error_response(StatusCode::BAD_REQUEST, "bad");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
