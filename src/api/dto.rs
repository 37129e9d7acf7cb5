//! Response shapes for the HTTP surface.
//!
//! Views are built from storage rows and then pass through the redaction
//! filter before serialization; secret values leave this process only as the
//! sentinel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Parameter, UpdateRecord};
use crate::pipeline::redact::{sentinel, Redactable};

/// One catalog entry as returned by `GET /params`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterView {
    pub name: String,
    pub value: String,
    pub secret: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Parameter> for ParameterView {
    fn from(p: Parameter) -> Self {
        Self {
            name: p.name,
            value: p.value,
            secret: p.secret,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl Redactable for ParameterView {
    fn is_secret(&self) -> bool {
        self.secret
    }

    fn redact_value(&mut self) {
        self.value = sentinel();
    }
}

/// One audit entry as returned by `GET /updates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateView {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub value: String,
    pub secret: bool,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UpdateRecord> for UpdateView {
    fn from(u: UpdateRecord) -> Self {
        Self {
            id: u.id,
            name: u.name,
            username: u.username,
            value: u.value,
            secret: u.secret,
            comment: u.comment,
            created_at: u.created_at,
        }
    }
}

impl Redactable for UpdateView {
    fn is_secret(&self) -> bool {
        self.secret
    }

    fn redact_value(&mut self) {
        self.value = sentinel();
    }
}
