//! Request handling and transformation.
//!
//! # Responsibilities
//! - Read the request ID set by the request-id middleware
//! - Turn the raw body into an optional JSON value
//! - Extract the simulated target (decoded path plus query)
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - An empty or whitespace-only body means "no body"
//! - A non-empty body that is not JSON is rejected before simulation

use std::borrow::Cow;

use axum::body::Bytes;
use axum::http::{HeaderMap, Uri};
use percent_encoding::percent_decode_str;
use serde_json::Value;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// The request ID, or `"unknown"` when the header is missing.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Parse a request body as JSON. `Ok(None)` for an empty body.
pub fn parse_body(bytes: &Bytes) -> Result<Option<Value>, serde_json::Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes).map(Some)
}

/// Path and query handed to the simulator, each path segment
/// percent-decoded on its own.
///
/// A segment whose decoded form would contain `/`, `?` or `#` is passed on
/// still encoded, so decoding never changes how the path splits.
pub fn simulated_target(uri: &Uri) -> String {
    let path = uri
        .path()
        .split('/')
        .map(decode_segment)
        .collect::<Vec<_>>()
        .join("/");

    match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path,
    }
}

fn decode_segment(raw: &str) -> Cow<'_, str> {
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) if !decoded.contains(['/', '?', '#']) => decoded,
        _ => Cow::Borrowed(raw),
    }
}
