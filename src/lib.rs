//! # ParamVault
//!
//! A configuration-parameter management service. Named values are created and
//! updated through a single write pipeline that resolves hierarchical names,
//! keeps secret values under envelope encryption, writes through to a remote
//! parameter store, and records every change in an append-only audit log.
//! Reads always pass through a redaction filter, so secret values leave the
//! process only as the `REDACTED` sentinel.
//!
//! ## Architecture
//!
//! ```text
//! HTTP API → Secret Pipeline → Remote Parameter Store
//!                ↓
//!     Catalog + Update Log (SQLite)
//! ```
//!
//! ## Core Components
//!
//! - **HTTP API**: Axum-based surface for batch writes and redacted reads
//! - **Secret Pipeline**: validate → resolve → decrypt → store-through → commit
//! - **Crypto Gateway**: key-management capability (local AES-GCM or Vault transit)
//! - **Persistence Layer**: SQLx with SQLite for the catalog and audit timeline

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod kms;
pub mod observability;
pub mod pipeline;
pub mod storage;
pub mod store;

// Re-export commonly used types and traits
pub use config::AppConfig;
pub use errors::{Error, Result};
pub use observability::init_tracing;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
