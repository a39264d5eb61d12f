//! HTTP surface tests over a real listener.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_crud_over_http() {
    let server = common::spawn_server(common::users_document(), "/api").await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/users/2")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["name"], "Bo");

    let res = client
        .post(server.url("/api/users"))
        .json(&json!({"name": "Cy"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"success": true, "id": 3}));

    let res = client
        .put(server.url("/api/users/3"))
        .json(&json!({"name": "Cyd"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.delete(server.url("/api/users/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let users: Value = client
        .get(server.url("/api/users"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        users,
        json!([
            {"id": 2, "name": "Bo", "posts": []},
            {"name": "Cyd", "id": 3}
        ])
    );

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_error_responses() {
    let server = common::spawn_server(common::users_document(), "/api").await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/elsewhere")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"error": "URL must start with /api"})
    );

    let res = client.patch(server.url("/api/users/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    let res = client.post(server.url("/api/users")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"error": "Request body required"})
    );

    let res = client
        .post(server.url("/api/users"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_admin_endpoints() {
    let server = common::spawn_server(common::users_document(), "/api").await;
    let client = reqwest::Client::new();

    let status: Value = client
        .get(server.url("/_mock/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["status"], "operational");
    assert_eq!(status["routes"], 14);

    let docs: Value = client
        .get(server.url("/_mock/docs"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(docs["apiPrefix"], "/api");
    assert_eq!(docs["routes"].as_array().unwrap().len(), 14);
    assert_eq!(docs["jsonStructure"], common::users_document());

    client.delete(server.url("/api/users/1")).send().await.unwrap();
    let res = client.post(server.url("/_mock/reset")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let data: Value = client
        .get(server.url("/_mock/data"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(data, common::users_document());

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_reload_swaps_catalogue() {
    let server = common::spawn_server(common::users_document(), "/api").await;
    let client = reqwest::Client::new();

    server.reload.send(json!({"orders": [{"id": 5, "total": 12}]})).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let res = client.get(server.url("/api/users")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.get(server.url("/api/orders/5")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"id": 5, "total": 12}));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown_stops_listener() {
    let server = common::spawn_server(json!({"items": []}), "/api").await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/items")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    server.shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let fresh = reqwest::Client::new();
    assert!(fresh.get(server.url("/api/items")).send().await.is_err());
}

#[tokio::test]
async fn test_encoded_key_segments() {
    let document = json!({"order items": [{"id": 1, "qty": 2}], "café": {"open": true}});
    let server = common::spawn_server(document, "/api").await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/order%20items/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"id": 1, "qty": 2}));

    let res = client.get(server.url("/api/caf%C3%A9")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"open": true}));

    // An encoded slash stays inside its segment.
    let res = client.get(server.url("/api/order%2Fitems/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.shutdown.trigger();
}
