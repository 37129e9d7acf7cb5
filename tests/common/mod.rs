#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use paramvault::config::DatabaseConfig;
use paramvault::domain::ChangeSubmission;
use paramvault::errors::{Error, Result};
use paramvault::kms::{KmsClient, LocalKms};
use paramvault::pipeline::SecretPipeline;
use paramvault::storage::{create_pool, DbPool};
use paramvault::store::{
    MemoryParameterStore, ParameterStore, PutParameterAck, PutParameterRequest,
};

pub const TEST_MASTER_KEY_HEX: &str =
    "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

pub const TEST_KEY_ID: &str = "alias/test-key";

/// In-memory pool. A single connection is required: every connection to
/// `sqlite://:memory:` opens its own database.
pub async fn test_pool() -> DbPool {
    let config = DatabaseConfig {
        url: "sqlite://:memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        auto_migrate: true,
        ..Default::default()
    };
    create_pool(&config).await.unwrap()
}

pub fn test_kms() -> Arc<LocalKms> {
    Arc::new(LocalKms::new(TEST_MASTER_KEY_HEX).unwrap())
}

/// Remote store that rejects puts for one configured name and delegates the
/// rest, for exercising per-record failure isolation.
#[derive(Debug)]
pub struct FlakyStore {
    deny: String,
    pub inner: MemoryParameterStore,
}

impl FlakyStore {
    pub fn denying(name: &str) -> Self {
        Self { deny: name.to_string(), inner: MemoryParameterStore::new() }
    }
}

#[async_trait]
impl ParameterStore for FlakyStore {
    async fn put_parameter(&self, request: PutParameterRequest) -> Result<PutParameterAck> {
        if request.name == self.deny {
            return Err(Error::remote_store(format!(
                "remote store rejected write for '{}'",
                request.name
            )));
        }
        self.inner.put_parameter(request).await
    }
}

pub async fn test_pipeline(store: Arc<dyn ParameterStore>) -> SecretPipeline {
    let pool = test_pool().await;
    SecretPipeline::new(pool, test_kms(), store, TEST_KEY_ID.to_string())
}

pub fn submission(prefix: &str, name: &str, value: &str, secret: bool) -> ChangeSubmission {
    ChangeSubmission {
        prefix: Some(prefix.to_string()),
        name: Some(name.to_string()),
        value: Some(value.to_string()),
        secret: Some(secret),
        comment: None,
        username: Some("alice".to_string()),
    }
}

/// Client-side encryption step: secret values arrive at the API already
/// sealed by the key service.
pub async fn encrypt(plaintext: &str) -> String {
    test_kms().encrypt(&plaintext.into()).await.unwrap()
}
