//! HTTP surface coverage: redaction on every read path, batch status codes,
//! and the liveness probe.

mod common;

use std::sync::Arc;

use axum_test::TestServer;
use common::{encrypt, submission, test_pipeline, FlakyStore};
use paramvault::api::build_router;
use paramvault::domain::REDACTED;
use paramvault::store::{MemoryParameterStore, ParameterStore};
use serde_json::Value;

async fn test_server(store: Arc<dyn ParameterStore>) -> TestServer {
    let pipeline = Arc::new(test_pipeline(store).await);
    TestServer::new(build_router(pipeline)).unwrap()
}

#[tokio::test]
async fn healthcheck_reports_working() {
    let server = test_server(Arc::new(MemoryParameterStore::new())).await;

    let response = server.get("/healthcheck").await;
    response.assert_status_ok();
    response.assert_text("Working");
}

#[tokio::test]
async fn listing_params_redacts_secret_values() {
    let server = test_server(Arc::new(MemoryParameterStore::new())).await;

    let ciphertext = encrypt("secretpw").await;
    let batch = vec![
        submission("sys", "port", "5432", false),
        submission("app", "db", &ciphertext, true),
    ];
    server.post("/params").json(&batch).await.assert_status_ok();

    let response = server.get("/params").await;
    response.assert_status_ok();
    let params: Value = response.json();

    // Ordered by name: /app/db before /sys/port.
    assert_eq!(params[0]["name"], "/app/db");
    assert_eq!(params[0]["value"], REDACTED);
    assert_eq!(params[0]["secret"], true);
    assert_eq!(params[1]["name"], "/sys/port");
    assert_eq!(params[1]["value"], "5432");
    assert_eq!(params[1]["secret"], false);

    // Neither plaintext nor ciphertext leaks through the read path.
    let body = response.text();
    assert!(!body.contains("secretpw"));
    assert!(!body.contains(&ciphertext));
}

#[tokio::test]
async fn listing_updates_redacts_secret_values() {
    let server = test_server(Arc::new(MemoryParameterStore::new())).await;

    let ciphertext = encrypt("secretpw").await;
    let batch = vec![
        submission("app", "db", &ciphertext, true),
        submission("sys", "port", "5432", false),
    ];
    server.post("/params").json(&batch).await.assert_status_ok();

    let response = server.get("/updates").await;
    response.assert_status_ok();
    let updates: Value = response.json();

    // Timeline order is submission order.
    assert_eq!(updates[0]["name"], "/app/db");
    assert_eq!(updates[0]["value"], REDACTED);
    assert_eq!(updates[0]["username"], "alice");
    assert_eq!(updates[1]["name"], "/sys/port");
    assert_eq!(updates[1]["value"], "5432");
}

#[tokio::test]
async fn batch_with_failures_returns_multi_status() {
    let server = test_server(Arc::new(FlakyStore::denying("/app/bad"))).await;

    let batch = vec![
        submission("app", "good", "1", false),
        submission("app", "bad", "2", false),
    ];
    let response = server.post("/params").json(&batch).await;
    response.assert_status(axum::http::StatusCode::MULTI_STATUS);

    let acks: Value = response.json();
    assert_eq!(acks[0]["status"], "stored");
    assert_eq!(acks[0]["version"], 1);
    assert_eq!(acks[1]["status"], "failed");
    assert_eq!(acks[1]["error"]["kind"], "remote_store");
}

#[tokio::test]
async fn fully_successful_batch_returns_ok() {
    let server = test_server(Arc::new(MemoryParameterStore::new())).await;

    let batch = vec![submission("sys", "port", "5432", false)];
    let response = server.post("/params").json(&batch).await;
    response.assert_status_ok();

    let acks: Value = response.json();
    assert_eq!(acks[0]["status"], "stored");
    assert_eq!(acks[0]["name"], "/sys/port");
}

#[tokio::test]
async fn empty_catalog_lists_as_empty_array() {
    let server = test_server(Arc::new(MemoryParameterStore::new())).await;

    let response = server.get("/params").await;
    response.assert_status_ok();
    let params: Value = response.json();
    assert_eq!(params, serde_json::json!([]));
}
