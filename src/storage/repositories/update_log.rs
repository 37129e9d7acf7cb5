//! Update log repository: the append-only audit timeline.
//!
//! Rows are inserted once and never updated or deleted; no mutating SQL other
//! than INSERT exists here. The stored `value` is the value as submitted,
//! pre-redaction.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, Sqlite, Transaction};

use crate::domain::{ResolvedChange, UpdateRecord};
use crate::errors::{Error, Result};
use crate::storage::DbPool;

#[derive(Debug, FromRow)]
struct UpdateRow {
    id: i64,
    name: String,
    username: String,
    value: String,
    secret: bool,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UpdateRow> for UpdateRecord {
    fn from(row: UpdateRow) -> Self {
        UpdateRecord {
            id: row.id,
            name: row.name,
            username: row.username,
            value: row.value,
            secret: row.secret,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateLogRepository {
    pool: DbPool,
}

impl UpdateLogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Append one audit entry inside the caller's transaction. Returns the
    /// assigned monotonic id.
    pub async fn append(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        change: &ResolvedChange,
        now: DateTime<Utc>,
    ) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO updates (name, username, value, secret, comment, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&change.name)
        .bind(&change.username)
        .bind(&change.value)
        .bind(change.secret)
        .bind(change.comment.as_deref())
        .bind(now)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            Error::database(e, format!("Failed to append audit entry for '{}'", change.name))
        })?;

        Ok(result.last_insert_rowid())
    }

    /// List the full timeline, oldest first.
    pub async fn list(&self) -> Result<Vec<UpdateRecord>> {
        let rows = sqlx::query_as::<_, UpdateRow>(
            "SELECT id, name, username, value, secret, comment, created_at FROM updates ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::database(e, "Failed to list audit entries"))?;

        Ok(rows.into_iter().map(UpdateRecord::from).collect())
    }

    /// List entries for one parameter name, oldest first.
    pub async fn list_for_name(&self, name: &str) -> Result<Vec<UpdateRecord>> {
        let rows = sqlx::query_as::<_, UpdateRow>(
            "SELECT id, name, username, value, secret, comment, created_at FROM updates \
             WHERE name = $1 ORDER BY id",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::database(e, format!("Failed to list audit entries for '{}'", name)))?;

        Ok(rows.into_iter().map(UpdateRecord::from).collect())
    }
}
