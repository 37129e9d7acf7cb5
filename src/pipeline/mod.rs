//! # Secret Pipeline
//!
//! The single write path for parameter changes. Each batch record moves
//! through validate → resolve → conflict check → (decrypt + remote put) →
//! one local transaction {audit append, catalog upsert}. Records are
//! processed sequentially in submission order and failures are isolated:
//! record k failing never prevents record k+1 from committing, and the
//! acknowledgment list stays positionally aligned with the input.

pub mod redact;

pub use redact::{redact, Redactable};

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{ChangeSubmission, ResolvedChange, SecretString};
use crate::errors::{Error, Result};
use crate::kms::KmsClient;
use crate::storage::repositories::{ParameterRepository, UpdateLogRepository};
use crate::storage::DbPool;
use crate::store::{ParameterKind, ParameterStore, PutParameterRequest};

/// Outcome of one batch record, positionally aligned with the submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordAck {
    /// Full hierarchical name, when the record got far enough to resolve one
    pub name: Option<String>,
    pub status: AckStatus,
    /// Remote-store version, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AckError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AckStatus {
    Stored,
    Failed,
}

/// Failure detail for one record. Carries the error kind and message only;
/// submitted values never appear here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckError {
    pub kind: String,
    pub message: String,
}

impl RecordAck {
    fn stored(name: String, version: i64) -> Self {
        Self { name: Some(name), status: AckStatus::Stored, version: Some(version), error: None }
    }

    fn failed(name: Option<String>, error: &Error) -> Self {
        Self {
            name,
            status: AckStatus::Failed,
            version: None,
            error: Some(AckError { kind: error.kind().to_string(), message: error.to_string() }),
        }
    }

    pub fn is_stored(&self) -> bool {
        self.status == AckStatus::Stored
    }
}

/// The write pipeline. Cheap to clone; shared across request handlers.
#[derive(Clone)]
pub struct SecretPipeline {
    pool: DbPool,
    params: ParameterRepository,
    updates: UpdateLogRepository,
    kms: Arc<dyn KmsClient>,
    store: Arc<dyn ParameterStore>,
    key_id: String,
}

impl SecretPipeline {
    pub fn new(
        pool: DbPool,
        kms: Arc<dyn KmsClient>,
        store: Arc<dyn ParameterStore>,
        key_id: String,
    ) -> Self {
        let params = ParameterRepository::new(pool.clone());
        let updates = UpdateLogRepository::new(pool.clone());
        Self { pool, params, updates, kms, store, key_id }
    }

    pub fn parameters(&self) -> &ParameterRepository {
        &self.params
    }

    pub fn update_log(&self) -> &UpdateLogRepository {
        &self.updates
    }

    /// Apply a batch of change submissions in order. Always returns one ack
    /// per input record, in input order.
    pub async fn apply(&self, batch: Vec<ChangeSubmission>) -> Vec<RecordAck> {
        let mut acks = Vec::with_capacity(batch.len());
        for submission in batch {
            let name_hint = submission.resolved_name();
            match self.apply_one(submission).await {
                Ok(ack) => acks.push(ack),
                Err(err) => {
                    warn!(
                        name = name_hint.as_deref().unwrap_or("<unresolved>"),
                        kind = err.kind(),
                        error = %err,
                        "Change record failed"
                    );
                    acks.push(RecordAck::failed(name_hint, &err));
                }
            }
        }
        acks
    }

    /// Process one record end to end. Side effects are ordered so that the
    /// local transaction commits only after the remote store has acknowledged
    /// the write; a remote failure leaves the catalog and audit log untouched.
    async fn apply_one(&self, submission: ChangeSubmission) -> Result<RecordAck> {
        let change = submission.validate()?.resolve();

        self.check_secret_flag(&change).await?;

        let ack = self.put_remote(&change).await?;
        self.commit_local(&change).await?;

        info!(name = %change.name, secret = change.secret, version = ack.version, "Parameter stored");
        Ok(RecordAck::stored(change.name, ack.version))
    }

    /// A parameter's secret classification is fixed at creation. Flipping it
    /// either way is rejected before any side effect runs.
    async fn check_secret_flag(&self, change: &ResolvedChange) -> Result<()> {
        if let Some(existing) = self.params.find_by_name(&change.name).await? {
            if existing.secret != change.secret {
                return Err(Error::conflict(format!(
                    "parameter '{}' already exists with secret={}; the flag cannot change",
                    change.name, existing.secret
                )));
            }
        }
        Ok(())
    }

    /// Forward the record to the remote store. Secret values are decrypted
    /// just-in-time and written as `SecureString` under the configured key;
    /// plain values pass through as submitted.
    async fn put_remote(&self, change: &ResolvedChange) -> Result<crate::store::PutParameterAck> {
        let request = if change.secret {
            let plaintext = self.kms.decrypt(&change.value).await?;
            PutParameterRequest {
                name: change.name.clone(),
                value: plaintext,
                kind: ParameterKind::SecureString,
                key_id: Some(self.key_id.clone()),
                description: change.comment.clone(),
                overwrite: true,
            }
        } else {
            PutParameterRequest {
                name: change.name.clone(),
                value: SecretString::from(change.value.as_str()),
                kind: ParameterKind::String,
                key_id: None,
                description: change.comment.clone(),
                overwrite: true,
            }
        };

        self.store.put_parameter(request).await
    }

    /// Append the audit entry and upsert the catalog row in one transaction,
    /// so the two collections never disagree about a committed change.
    async fn commit_local(&self, change: &ResolvedChange) -> Result<()> {
        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::database(e, "Failed to start change transaction"))?;

        self.updates.append(&mut tx, change, now).await?;
        self.params.upsert(&mut tx, change, now).await?;

        tx.commit()
            .await
            .map_err(|e| Error::database(e, "Failed to commit change transaction"))?;

        Ok(())
    }
}
