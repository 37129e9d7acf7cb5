//! # Configuration Management
//!
//! Configuration for the paramvault API, loaded from environment variables
//! (with `.env` support in `main`). All paramvault-specific variables use the
//! `PARAMVAULT_` prefix; database settings follow the conventional
//! `DATABASE_*` names.

mod settings;

pub use settings::{
    ApiServerConfig, AppConfig, DatabaseConfig, KmsBackend, KmsConfig, ObservabilityConfig,
    StoreBackend, StoreConfig, VaultSettings,
};
