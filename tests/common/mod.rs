//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use json_mock_api::config::MockConfig;
use json_mock_api::docs::{DocumentationStore, MemoryBackend};
use json_mock_api::http::HttpServer;
use json_mock_api::lifecycle::{Bootstrap, Shutdown};
use json_mock_api::session::MockSession;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// The document most scenarios run against.
pub fn users_document() -> Value {
    json!({
        "users": [
            {"id": 1, "name": "Ann", "posts": [{"id": 10, "title": "Hi"}]},
            {"id": 2, "name": "Bo", "posts": []}
        ],
        "settings": {"theme": "dark"}
    })
}

/// A running server on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub reload: mpsc::UnboundedSender<Value>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a server over `document` with in-memory documentation.
pub async fn spawn_server(document: Value, prefix: &str) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let session = MockSession::new(document, prefix);
    let docs = DocumentationStore::new(MemoryBackend::new());
    docs.save(session.documentation());

    let server = HttpServer::new(&MockConfig::default(), Bootstrap { session, docs });
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let (reload, updates) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let _ = server.run(listener, updates, server_shutdown).await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer { addr, shutdown, reload }
}
