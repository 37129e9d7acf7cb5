//! # Storage and Persistence
//!
//! Database connectivity and the persistence layer for the parameter catalog
//! and the append-only update log.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use migrations::{get_migration_version, list_applied_migrations, MigrationInfo};
pub use pool::{create_pool, DbPool};
pub use repositories::{ParameterRepository, UpdateLogRepository};

use crate::errors::{Error, Result};

/// Run database migrations
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    migrations::run_migrations(pool).await
}

/// Check database connectivity
pub async fn check_connection(pool: &DbPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| Error::database(e, "Database connectivity check failed"))?;
    Ok(())
}
