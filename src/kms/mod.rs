//! # Crypto Gateway
//!
//! Thin capability wrapper around a key-management encrypt/decrypt operation.
//! Ciphertext crossing any client-facing boundary is base64 text; the gateway
//! owns the encode/decode around the raw blob the backend produces.
//!
//! Backends:
//! - [`LocalKms`]: in-process AES-256-GCM, keyed from configuration (dev/test)
//! - [`VaultTransitKms`]: Vault transit engine keyed by the configured key id
//!
//! Gateways hold no mutable state and may be invoked concurrently. A failure
//! aborts only the record being processed; batch policy lives in the pipeline.

mod local;
mod vault;

pub use local::LocalKms;
pub use vault::VaultTransitKms;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{KmsBackend, KmsConfig, VaultSettings};
use crate::domain::SecretString;
use crate::errors::{Error, Result};

/// Key-management capability: envelope encryption for parameter values.
#[async_trait]
pub trait KmsClient: Send + Sync {
    /// Encrypt plaintext, returning base64-encoded ciphertext.
    async fn encrypt(&self, plaintext: &SecretString) -> Result<String>;

    /// Decrypt base64-encoded ciphertext back to plaintext.
    async fn decrypt(&self, ciphertext: &str) -> Result<SecretString>;
}

/// Build the configured key-management client.
pub async fn from_config(
    config: &KmsConfig,
    vault: Option<&VaultSettings>,
) -> Result<Arc<dyn KmsClient>> {
    match config.backend {
        KmsBackend::Local => {
            let key = config.master_key_hex.as_deref().ok_or_else(|| {
                Error::config("local KMS backend selected without a master key")
            })?;
            Ok(Arc::new(LocalKms::new(key)?))
        }
        KmsBackend::Vault => {
            let settings = vault.ok_or_else(|| {
                Error::config("vault KMS backend selected without Vault connection settings")
            })?;
            Ok(Arc::new(VaultTransitKms::new(settings, &config.transit_mount, &config.key_id).await?))
        }
    }
}
