//! In-memory parameter store for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ParameterKind, ParameterStore, PutParameterAck, PutParameterRequest};
use crate::domain::SecretString;
use crate::errors::{Error, Result};

/// What the remote side retains for one parameter.
#[derive(Debug, Clone)]
pub struct StoredParameter {
    pub value: SecretString,
    pub kind: ParameterKind,
    pub version: i64,
    pub key_id: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default)]
pub struct MemoryParameterStore {
    entries: RwLock<HashMap<String, StoredParameter>>,
}

impl MemoryParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect a stored entry. Test-facing accessor; the pipeline never reads
    /// back through the store.
    pub async fn get(&self, name: &str) -> Option<StoredParameter> {
        self.entries.read().await.get(name).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ParameterStore for MemoryParameterStore {
    async fn put_parameter(&self, request: PutParameterRequest) -> Result<PutParameterAck> {
        let mut entries = self.entries.write().await;

        let version = match entries.get(&request.name) {
            Some(_) if !request.overwrite => {
                return Err(Error::remote_store(format!(
                    "parameter '{}' already exists and overwrite is disabled",
                    request.name
                )));
            }
            Some(existing) => existing.version + 1,
            None => 1,
        };

        entries.insert(
            request.name.clone(),
            StoredParameter {
                value: request.value,
                kind: request.kind,
                version,
                key_id: request.key_id,
                description: request.description,
            },
        );

        Ok(PutParameterAck { name: request.name, version })
    }
}
