//! Parameter catalog repository.
//!
//! Holds the current value of every named parameter. `value` is always the
//! value as submitted (ciphertext for secret records); decrypted plaintext is
//! never written here. The `secret` column is set on first insert and never
//! updated afterwards.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, Sqlite, Transaction};

use crate::domain::{Parameter, ResolvedChange};
use crate::errors::{Error, Result};
use crate::storage::DbPool;

#[derive(Debug, FromRow)]
struct ParameterRow {
    name: String,
    value: String,
    secret: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ParameterRow> for Parameter {
    fn from(row: ParameterRow) -> Self {
        Parameter {
            name: row.name,
            value: row.value,
            secret: row.secret,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParameterRepository {
    pool: DbPool,
}

impl ParameterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// List all parameters ordered by name.
    pub async fn list(&self) -> Result<Vec<Parameter>> {
        let rows = sqlx::query_as::<_, ParameterRow>(
            "SELECT name, value, secret, created_at, updated_at FROM params ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::database(e, "Failed to list parameters"))?;

        Ok(rows.into_iter().map(Parameter::from).collect())
    }

    /// Fetch one parameter by full name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Parameter>> {
        let row = sqlx::query_as::<_, ParameterRow>(
            "SELECT name, value, secret, created_at, updated_at FROM params WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::database(e, format!("Failed to fetch parameter '{}'", name)))?;

        Ok(row.map(Parameter::from))
    }

    /// Insert or update the catalog row for a change, inside the caller's
    /// transaction. The secret flag is written once on insert; the upsert arm
    /// only touches `value` and `updated_at`.
    pub async fn upsert(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        change: &ResolvedChange,
        now: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO params (name, value, secret, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4) \
             ON CONFLICT(name) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(&change.name)
        .bind(&change.value)
        .bind(change.secret)
        .bind(now)
        .execute(&mut **tx)
        .await
        .map_err(|e| Error::database(e, format!("Failed to upsert parameter '{}'", change.name)))?;

        Ok(())
    }
}
