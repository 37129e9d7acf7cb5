//! Vault KV v2 parameter-store backend.
//!
//! Each parameter is written under its hierarchical name (leading slash
//! stripped for the KV path) as a small map carrying the value, its
//! classification, and the optional description. KV v2 writes are versioned
//! overwrites, which matches the pipeline's overwrite-enabled puts.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use vaultrs::client::{VaultClient, VaultClientSettingsBuilder};
use vaultrs::kv2;

use super::{ParameterStore, PutParameterAck, PutParameterRequest};
use crate::config::VaultSettings;
use crate::errors::{Error, Result};

pub struct VaultKvStore {
    client: VaultClient,
    mount: String,
}

impl fmt::Debug for VaultKvStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultKvStore")
            .field("client", &"[VaultClient]")
            .field("mount", &self.mount)
            .finish()
    }
}

impl VaultKvStore {
    /// Connect to Vault and verify it is reachable.
    pub async fn new(settings: &VaultSettings, mount: &str) -> Result<Self> {
        if settings.address.is_empty() {
            return Err(Error::config("Vault address cannot be empty"));
        }

        let mut builder = VaultClientSettingsBuilder::default();
        builder.address(&settings.address);
        if let Some(ref token) = settings.token {
            builder.token(token);
        }
        if let Some(ref namespace) = settings.namespace {
            builder.namespace(Some(namespace.clone()));
        }

        let client_settings = builder
            .build()
            .map_err(|e| Error::config(format!("Invalid Vault configuration: {}", e)))?;
        let client = VaultClient::new(client_settings)
            .map_err(|e| Error::config(format!("Failed to create Vault client: {}", e)))?;

        match vaultrs::sys::health(&client).await {
            Ok(_) => {
                tracing::info!(address = %settings.address, mount = %mount, "Connected to Vault KV store");
            }
            Err(e) => {
                tracing::error!(error = %e, address = %settings.address, "Vault health check failed");
                return Err(Error::config(format!("Vault health check failed: {}", e)));
            }
        }

        Ok(Self { client, mount: mount.to_string() })
    }

    fn kv_path(name: &str) -> &str {
        name.trim_start_matches('/')
    }
}

#[async_trait]
impl ParameterStore for VaultKvStore {
    async fn put_parameter(&self, request: PutParameterRequest) -> Result<PutParameterAck> {
        let path = Self::kv_path(&request.name);

        if !request.overwrite {
            let existing: std::result::Result<HashMap<String, String>, _> =
                kv2::read(&self.client, &self.mount, path).await;
            if existing.is_ok() {
                return Err(Error::remote_store(format!(
                    "parameter '{}' already exists and overwrite is disabled",
                    request.name
                )));
            }
        }

        let mut data = HashMap::new();
        data.insert("value".to_string(), request.value.expose_secret().to_string());
        data.insert("type".to_string(), request.kind.as_str().to_string());
        if let Some(key_id) = &request.key_id {
            data.insert("key_id".to_string(), key_id.clone());
        }
        if let Some(description) = &request.description {
            data.insert("description".to_string(), description.clone());
        }

        let metadata = kv2::set(&self.client, &self.mount, path, &data).await.map_err(|e| {
            tracing::warn!(error = %e, name = %request.name, "KV write failed");
            Error::remote_store(format!("failed to store parameter '{}': {}", request.name, e))
        })?;

        Ok(PutParameterAck { name: request.name, version: metadata.version as i64 })
    }
}
