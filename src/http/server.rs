//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the admin routes and the simulator catch-all
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Bind server to listener
//! - Serialize all session access through one lock
//! - Apply source document reloads while serving
//! - Observability (metrics, correlation IDs)

use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, State},
    http::{Method, Request, StatusCode, Uri, HeaderMap},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin::setup_admin_router;
use crate::config::MockConfig;
use crate::docs::DocumentationStore;
use crate::http::request::{parse_body, request_id, simulated_target, X_REQUEST_ID};
use crate::http::response::error_response;
use crate::lifecycle::{stopped, Bootstrap};
use crate::observability::metrics;
use crate::session::MockSession;

/// Application state injected into handlers.
///
/// The session sits behind a single mutex: every simulated request, reset
/// and reload runs to completion before the next one starts, so concurrent
/// POSTs can never assign the same id.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<MockSession>>,
    pub docs: Arc<DocumentationStore>,
}

impl AppState {
    pub fn new(bootstrap: Bootstrap) -> Self {
        Self {
            session: Arc::new(Mutex::new(bootstrap.session)),
            docs: Arc::new(bootstrap.docs),
        }
    }

    pub fn session(&self) -> MutexGuard<'_, MockSession> {
        self.session.lock().expect("session mutex poisoned")
    }

    /// Swap in a new source document and persist its documentation.
    pub fn reload(&self, document: Value) {
        let docs = {
            let mut session = self.session();
            session.reload(document);
            metrics::record_routes(session.catalogue().len());
            session.documentation()
        };
        metrics::record_reload();
        tracing::info!(routes = docs.routes.len(), "Routes regenerated from updated document");
        self.docs.save(docs);
    }
}

/// HTTP server for the mock API.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server over a bootstrapped session.
    pub fn new(config: &MockConfig, bootstrap: Bootstrap) -> Self {
        let state = AppState::new(bootstrap);
        let router = Self::build_router(config, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &MockConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                let request_id = req
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!("request", method = %req.method(), uri = %req.uri(), request_id)
            }))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        Router::new()
            .merge(setup_admin_router())
            .route("/{*path}", any(simulate_handler))
            .route("/", any(simulate_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(middleware)
    }

    /// The router, for driving the server without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Documents received on `doc_updates` replace the session's source;
    /// the server stops when `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut doc_updates: mpsc::UnboundedReceiver<Value>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let state = self.state.clone();
        let reloader = tokio::spawn(async move {
            while let Some(document) = doc_updates.recv().await {
                state.reload(document);
            }
        });

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(stopped(shutdown))
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Forward any request outside the admin routes to the simulator.
async fn simulate_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers);
    let target = simulated_target(&uri);

    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Rejected non-JSON body");
            metrics::record_request(method.as_str(), 400, start_time);
            return error_response(StatusCode::BAD_REQUEST, "Request body must be valid JSON");
        }
    };

    let response = state.session().request(method.as_str(), &target, body.as_ref());

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        target = %target,
        status = response.status,
        "Simulated request handled"
    );
    metrics::record_request(method.as_str(), response.status, start_time);

    response.into_response()
}
