#![allow(clippy::unwrap_used, clippy::indexing_slicing, reason = "test assertions")]

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use duallist_types::models::QueueConfig;

use crate::router::build_router;
use crate::state::AppState;
use crate::test_helpers::{test_app_state, test_app_state_with, test_config};

fn server(state: AppState) -> TestServer {
    TestServer::new(build_router(state)).unwrap()
}

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_and_version() {
    let server = server(test_app_state(&[], &[]));

    let health = server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>()["status"], "ok");
    server.get("/healthz").await.assert_status_ok();

    let version: Value = server.get("/version").await.json();
    assert!(version["version"].is_string());
    assert_eq!(version["cargo_version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_select_flow_over_http() {
    let server = server(test_app_state(&["1", "2", "3"], &[]));

    let response = server.post("/items/select").json(&json!({"id": "2"})).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"queued": true, "id": "2"}));

    let again = server.post("/items/select").json(&json!({"id": "2"})).await;
    again.assert_status(StatusCode::CONFLICT);
    assert_eq!(again.json::<Value>()["code"], "already_processing");

    // Not applied yet.
    let selected: Value = server.get("/items?collection=selected").await.json();
    assert!(ids(&selected).is_empty());

    server.post("/items/flush").await.assert_status_ok();

    let selected: Value = server.get("/items?selected=true").await.json();
    assert_eq!(ids(&selected), vec!["2"]);
    let available: Value = server.get("/items").await.json();
    assert_eq!(ids(&available), vec!["1", "3"]);
}

#[tokio::test]
async fn test_add_errors_render_error_body() {
    let server = server(test_app_state(&["1"], &[]));

    let missing = server.post("/items/add").json(&json!({})).await;
    missing.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(missing.json::<Value>(), json!({"error": "Missing ID!", "code": "missing_id"}));

    let existing = server.post("/items/add").json(&json!({"id": "1"})).await;
    existing.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(existing.json::<Value>()["code"], "duplicate_id");

    server.post("/items/add").json(&json!({"id": "x"})).await.assert_status_ok();
    let pending = server.post("/items/add").json(&json!({"id": "x"})).await;
    assert_eq!(pending.json::<Value>()["error"], "Item with ID x already exists!");
}

#[tokio::test]
async fn test_malformed_body_is_invalid_request() {
    let server = server(test_app_state(&["1"], &[]));
    let response = server.post("/items/reorder").json(&json!({"toId": "1"})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "invalid_request");
}

#[tokio::test]
async fn test_non_json_body_keeps_media_type_status() {
    let server = server(test_app_state(&["1"], &[]));
    let response = server.post("/items/select").text(r#"{"id": "1"}"#).await;
    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(response.json::<Value>()["code"], "unsupported_media_type");
}

#[tokio::test]
async fn test_reorder_accepts_both_shapes() {
    let server = server(test_app_state(&[], &["a", "b", "c"]));

    let moved = server.post("/items/reorder").json(&json!({"fromId": "c", "toId": "a"})).await;
    moved.assert_status_ok();
    assert_eq!(moved.json::<Value>(), json!({"queued": true}));

    let missing = server.post("/items/reorder").json(&json!({"fromId": "zz"})).await;
    missing.assert_status(StatusCode::NOT_FOUND);

    let arranged = server.post("/items/reorder").json(&json!({"orderedIds": ["b", "a"]})).await;
    arranged.assert_status_ok();

    server.post("/items/flush").await.assert_status_ok();
    // The arrange superseded the pending move.
    let selected: Value = server.get("/items?collection=selected").await.json();
    assert_eq!(ids(&selected), vec!["b", "a", "c"]);
}

#[tokio::test]
async fn test_pagination_and_filter_query() {
    let mut config = test_config();
    config.pagination.default_limit = 5;
    config.pagination.max_limit = 8;
    let state = AppState::new(duallist_core::ListStore::seeded(30), config);
    let server = server(state);

    let first: Value = server.get("/items").await.json();
    assert_eq!(ids(&first), vec!["1", "2", "3", "4", "5"]);

    let capped: Value = server.get("/items?limit=100").await.json();
    assert_eq!(ids(&capped).len(), 8);

    let filtered: Value = server.get("/items?filter=2&page=2&limit=3").await.json();
    assert_eq!(ids(&filtered), vec!["21", "22", "23"]);

    let bad = server.get("/items?page=abc").await;
    bad.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_queue_full_is_service_unavailable() {
    let mut config = test_config();
    config.queue = QueueConfig { max_pending: Some(1), ..config.queue };
    let server = server(test_app_state_with(&["1", "2"], &[], config));

    server.post("/items/select").json(&json!({"id": "1"})).await.assert_status_ok();
    let full = server.post("/items/select").json(&json!({"id": "2"})).await;
    full.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(full.json::<Value>()["code"], "queue_full");
}

#[tokio::test]
async fn test_stats_and_flush_payloads() {
    let server = server(test_app_state(&["1", "2"], &[]));
    server.post("/items/add").json(&json!({"id": "3"})).await.assert_status_ok();

    let stats: Value = server.get("/items/stats").await.json();
    assert_eq!(stats["store"]["available"], 2);
    assert_eq!(stats["inFlight"], 1);
    assert_eq!(stats["queues"][0]["name"], "add");
    assert_eq!(stats["queues"][0]["pending"], 1);

    let flushed: Value = server.post("/items/flush").await.json();
    assert_eq!(flushed[0]["queue"], "add");
    assert_eq!(flushed[0]["status"], "flushed");
    assert_eq!(flushed[0]["report"]["applied"], 1);
    assert_eq!(flushed[1]["status"], "idle");
}

#[tokio::test]
async fn test_unknown_item_route_is_json_404() {
    let server = server(test_app_state(&[], &[]));
    let response = server.get("/items/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!({"error": "Not found", "code": "not_found"}));
}
