//! # Domain Model
//!
//! Entities and request-scoped record shapes for the parameter-management
//! pipeline. The write path moves through three explicit shapes:
//! [`ChangeSubmission`] (raw, boundary-validated) → [`ChangeRecord`] (required
//! fields present) → [`ResolvedChange`] (full hierarchical name, transient
//! prefix gone). Each stage produces a new value; nothing is mutated in place.

mod secret;

pub use secret::SecretString;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Sentinel written over secret values on every read path.
pub const REDACTED: &str = "REDACTED";

/// Compose a hierarchical parameter name from a prefix and a short name.
///
/// Pure concatenation; no character-set validation is performed here, so
/// callers must not assume the remote store accepts arbitrary characters.
pub fn resolve_name(prefix: &str, short_name: &str) -> String {
    format!("/{}/{}", prefix, short_name)
}

/// Current-value record in the parameter catalog.
///
/// `value` holds the value as submitted: ciphertext for secret parameters.
/// Plaintext lives only in the remote parameter store, never at rest here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
    pub secret: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One immutable entry in the append-only audit timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub id: i64,
    pub name: String,
    pub username: String,
    /// Value as submitted, pre-redaction (ciphertext for secret records)
    pub value: String,
    pub secret: bool,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Raw batch record as submitted by a client. All fields optional so that a
/// missing required field becomes a per-record validation failure instead of
/// rejecting the whole batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeSubmission {
    pub prefix: Option<String>,
    pub name: Option<String>,
    pub value: Option<String>,
    pub secret: Option<bool>,
    pub comment: Option<String>,
    pub username: Option<String>,
}

impl ChangeSubmission {
    /// Validate required fields, producing a [`ChangeRecord`]. Runs before any
    /// side effect for the record.
    pub fn validate(self) -> Result<ChangeRecord> {
        fn required(value: Option<String>, field: &str) -> Result<String> {
            match value {
                Some(v) if !v.is_empty() => Ok(v),
                _ => Err(Error::validation_field(format!("{} is required", field), field)),
            }
        }

        let prefix = required(self.prefix, "prefix")?;
        let name = required(self.name, "name")?;
        let username = required(self.username, "username")?;
        let value = self
            .value
            .ok_or_else(|| Error::validation_field("value is required", "value"))?;
        let secret = self
            .secret
            .ok_or_else(|| Error::validation_field("secret is required", "secret"))?;

        Ok(ChangeRecord { prefix, name, value, secret, comment: self.comment, username })
    }

    /// Best-effort full name for error reporting when validation fails later.
    pub fn resolved_name(&self) -> Option<String> {
        match (self.prefix.as_deref(), self.name.as_deref()) {
            (Some(prefix), Some(name)) => Some(resolve_name(prefix, name)),
            _ => None,
        }
    }
}

/// A validated batch record, still carrying its transient prefix.
#[derive(Debug, Clone)]
pub struct ChangeRecord {
    pub prefix: String,
    pub name: String,
    pub value: String,
    pub secret: bool,
    pub comment: Option<String>,
    pub username: String,
}

impl ChangeRecord {
    /// Resolve the full hierarchical name and drop the transient prefix.
    pub fn resolve(self) -> ResolvedChange {
        ResolvedChange {
            name: resolve_name(&self.prefix, &self.name),
            value: self.value,
            secret: self.secret,
            comment: self.comment,
            username: self.username,
        }
    }
}

/// Post-resolution record shape: the prefix no longer exists, the name is the
/// full hierarchical key. This is what the pipeline persists and forwards.
#[derive(Debug, Clone)]
pub struct ResolvedChange {
    pub name: String,
    /// Value as submitted; for secret records this is the base64 ciphertext
    pub value: String,
    pub secret: bool,
    pub comment: Option<String>,
    pub username: String,
}
