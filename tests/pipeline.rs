//! End-to-end pipeline coverage: plain and secret writes, failure isolation,
//! positional acknowledgments, and the immutable secret classification.

mod common;

use std::sync::Arc;

use common::{encrypt, submission, test_pipeline, FlakyStore, TEST_KEY_ID};
use paramvault::domain::ChangeSubmission;
use paramvault::store::{MemoryParameterStore, ParameterKind};

#[tokio::test]
async fn plain_parameter_flows_to_store_catalog_and_audit() {
    let store = Arc::new(MemoryParameterStore::new());
    let pipeline = test_pipeline(store.clone()).await;

    let acks = pipeline.apply(vec![submission("sys", "port", "5432", false)]).await;
    assert_eq!(acks.len(), 1);
    assert!(acks[0].is_stored());
    assert_eq!(acks[0].name.as_deref(), Some("/sys/port"));
    assert_eq!(acks[0].version, Some(1));

    let entry = store.get("/sys/port").await.unwrap();
    assert_eq!(entry.value.expose_secret(), "5432");
    assert_eq!(entry.kind, ParameterKind::String);

    let params = pipeline.parameters().list().await.unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].value, "5432");
    assert!(!params[0].secret);

    let updates = pipeline.update_log().list().await.unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].username, "alice");
    assert_eq!(updates[0].name, "/sys/port");
}

#[tokio::test]
async fn secret_parameter_is_decrypted_only_for_the_remote_store() {
    let store = Arc::new(MemoryParameterStore::new());
    let pipeline = test_pipeline(store.clone()).await;

    let ciphertext = encrypt("secretpw").await;
    let acks = pipeline.apply(vec![submission("app", "db", &ciphertext, true)]).await;
    assert!(acks[0].is_stored());

    // The remote store holds the plaintext under key protection.
    let entry = store.get("/app/db").await.unwrap();
    assert_eq!(entry.value.expose_secret(), "secretpw");
    assert_eq!(entry.kind, ParameterKind::SecureString);

    // Locally only the submitted ciphertext is at rest.
    let params = pipeline.parameters().list().await.unwrap();
    assert_eq!(params[0].value, ciphertext);
    assert!(params[0].secret);
    assert_ne!(params[0].value, "secretpw");

    let updates = pipeline.update_log().list().await.unwrap();
    assert_eq!(updates[0].value, ciphertext);
    assert!(updates[0].secret);
}

#[tokio::test]
async fn failed_record_does_not_block_the_rest_of_the_batch() {
    let store = Arc::new(FlakyStore::denying("/app/bad"));
    let pipeline = test_pipeline(store.clone()).await;

    let acks = pipeline
        .apply(vec![
            submission("app", "first", "1", false),
            submission("app", "bad", "2", false),
            submission("app", "third", "3", false),
        ])
        .await;

    assert_eq!(acks.len(), 3);
    assert!(acks[0].is_stored());
    assert!(!acks[1].is_stored());
    assert!(acks[2].is_stored());

    // Acks stay positionally aligned with the submitted batch.
    assert_eq!(acks[1].name.as_deref(), Some("/app/bad"));
    let error = acks[1].error.as_ref().unwrap();
    assert_eq!(error.kind, "remote_store");

    // The failed record left no local trace.
    let params = pipeline.parameters().list().await.unwrap();
    let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["/app/first", "/app/third"]);
    assert_eq!(pipeline.update_log().list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn validation_failure_is_reported_per_record() {
    let store = Arc::new(MemoryParameterStore::new());
    let pipeline = test_pipeline(store.clone()).await;

    let mut incomplete = submission("app", "db", "v", false);
    incomplete.username = None;

    let acks = pipeline.apply(vec![incomplete, submission("app", "ok", "v", false)]).await;

    assert!(!acks[0].is_stored());
    assert_eq!(acks[0].error.as_ref().unwrap().kind, "validation");
    // Prefix and name were present, so the failure still names the parameter.
    assert_eq!(acks[0].name.as_deref(), Some("/app/db"));
    assert!(acks[1].is_stored());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn secret_classification_cannot_change() {
    let store = Arc::new(MemoryParameterStore::new());
    let pipeline = test_pipeline(store.clone()).await;

    let acks = pipeline.apply(vec![submission("app", "db", "plain", false)]).await;
    assert!(acks[0].is_stored());

    let ciphertext = encrypt("secretpw").await;
    let acks = pipeline.apply(vec![submission("app", "db", &ciphertext, true)]).await;
    assert!(!acks[0].is_stored());
    assert_eq!(acks[0].error.as_ref().unwrap().kind, "conflict");

    // Rejected before any side effect: the stored value is untouched.
    let entry = store.get("/app/db").await.unwrap();
    assert_eq!(entry.version, 1);
    assert_eq!(entry.value.expose_secret(), "plain");
    assert_eq!(pipeline.update_log().list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn overwrite_bumps_remote_version_and_updates_catalog() {
    let store = Arc::new(MemoryParameterStore::new());
    let pipeline = test_pipeline(store.clone()).await;

    let acks = pipeline.apply(vec![submission("sys", "port", "5432", false)]).await;
    assert_eq!(acks[0].version, Some(1));
    let acks = pipeline.apply(vec![submission("sys", "port", "6432", false)]).await;
    assert_eq!(acks[0].version, Some(2));

    let params = pipeline.parameters().list().await.unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].value, "6432");

    // Every write stays in the timeline.
    let updates = pipeline.update_log().list().await.unwrap();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].value, "5432");
    assert_eq!(updates[1].value, "6432");
}

#[tokio::test]
async fn bad_ciphertext_fails_before_any_side_effect() {
    let store = Arc::new(MemoryParameterStore::new());
    let pipeline = test_pipeline(store.clone()).await;

    let acks = pipeline.apply(vec![submission("app", "db", "not-a-ciphertext", true)]).await;
    assert!(!acks[0].is_stored());
    assert_eq!(acks[0].error.as_ref().unwrap().kind, "crypto");

    assert!(store.is_empty().await);
    assert!(pipeline.parameters().list().await.unwrap().is_empty());
    assert!(pipeline.update_log().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn secret_writes_carry_the_configured_key_id() {
    let store = Arc::new(MemoryParameterStore::new());
    let pipeline = test_pipeline(store.clone()).await;

    let ciphertext = encrypt("secretpw").await;
    pipeline.apply(vec![submission("app", "db", &ciphertext, true)]).await;

    let entry = store.get("/app/db").await.unwrap();
    assert_eq!(entry.kind, ParameterKind::SecureString);
    assert_eq!(entry.key_id.as_deref(), Some(TEST_KEY_ID));

    pipeline.apply(vec![submission("app", "plain", "v", false)]).await;
    let entry = store.get("/app/plain").await.unwrap();
    assert!(entry.key_id.is_none());
}

#[tokio::test]
async fn empty_batch_yields_empty_acks() {
    let store = Arc::new(MemoryParameterStore::new());
    let pipeline = test_pipeline(store).await;

    let acks = pipeline.apply(Vec::<ChangeSubmission>::new()).await;
    assert!(acks.is_empty());
}

#[tokio::test]
async fn error_messages_never_contain_submitted_values() {
    let store = Arc::new(FlakyStore::denying("/app/bad"));
    let pipeline = test_pipeline(store).await;

    let acks = pipeline.apply(vec![submission("app", "bad", "hunter2", false)]).await;
    let error = acks[0].error.as_ref().unwrap();
    assert!(!error.message.contains("hunter2"));
    assert!(error.message.contains("/app/bad"));
}
