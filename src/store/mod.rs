//! # Remote Parameter Store
//!
//! Opaque external key-value store that durably holds the final value for each
//! parameter: plaintext (as `SecureString`) for secret records, the submitted
//! value for plain ones. Writes always use overwrite semantics, so a retried
//! put converges on the same state.

mod memory;
mod vault;

pub use memory::MemoryParameterStore;
pub use vault::VaultKvStore;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{StoreBackend, StoreConfig, VaultSettings};
use crate::domain::SecretString;
use crate::errors::{Error, Result};

/// Classification of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterKind {
    /// Plain value, stored as submitted
    String,
    /// Secret value, stored decrypted under key-service protection
    SecureString,
}

impl ParameterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::String => "String",
            ParameterKind::SecureString => "SecureString",
        }
    }
}

/// One put operation against the remote store.
#[derive(Debug, Clone)]
pub struct PutParameterRequest {
    /// Full hierarchical name, e.g. `/app/db`
    pub name: String,
    pub value: SecretString,
    pub kind: ParameterKind,
    /// Key identifier, set for secure writes
    pub key_id: Option<String>,
    pub description: Option<String>,
    pub overwrite: bool,
}

/// Acknowledgment returned by the remote store for one put.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutParameterAck {
    pub name: String,
    /// Monotonic per-name version assigned by the store
    pub version: i64,
}

/// Remote parameter-store capability.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    async fn put_parameter(&self, request: PutParameterRequest) -> Result<PutParameterAck>;
}

/// Build the configured remote store backend.
pub async fn from_config(
    config: &StoreConfig,
    vault: Option<&VaultSettings>,
) -> Result<Arc<dyn ParameterStore>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryParameterStore::new())),
        StoreBackend::Vault => {
            let settings = vault.ok_or_else(|| {
                Error::config("vault store backend selected without Vault connection settings")
            })?;
            Ok(Arc::new(VaultKvStore::new(settings, &config.mount).await?))
        }
    }
}
