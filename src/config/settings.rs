//! # Configuration Settings
//!
//! Defines the configuration structures for the paramvault API.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env_var(name).and_then(|s| s.parse::<T>().ok()).unwrap_or(default)
}

fn env_bool(name: &str, default: bool) -> bool {
    env_var(name).map(|s| s.to_lowercase() == "true" || s == "1").unwrap_or(default)
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiServerConfig,
    pub database: DatabaseConfig,
    pub observability: ObservabilityConfig,
    pub kms: KmsConfig,
    pub store: StoreConfig,
    /// Shared Vault connection settings, present when any backend is `vault`
    pub vault: Option<VaultSettings>,
}

impl AppConfig {
    /// Load the full configuration from environment variables.
    ///
    /// A missing key identifier or an incomplete Vault connection is a startup
    /// configuration error, never a per-request one.
    pub fn from_env() -> Result<Self> {
        let api = ApiServerConfig::from_env();
        let database = DatabaseConfig::from_env();
        let observability = ObservabilityConfig::from_env();
        let kms = KmsConfig::from_env()?;
        let store = StoreConfig::from_env()?;

        let vault = if kms.backend == KmsBackend::Vault || store.backend == StoreBackend::Vault {
            Some(VaultSettings::from_env()?)
        } else {
            None
        };

        let config = Self { api, database, observability, kms, store, vault };
        config.validate()?;
        Ok(config)
    }

    /// Validate the assembled configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.port == 0 {
            return Err(Error::config("API port must be non-zero"));
        }
        self.database.validate()?;
        self.kms.validate()?;
        Ok(())
    }
}

/// HTTP API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiServerConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self { bind_address: "127.0.0.1".to_string(), port: 8080 }
    }
}

impl ApiServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_address: env_var("PARAMVAULT_API_BIND_ADDRESS")
                .unwrap_or_else(|| "127.0.0.1".to_string()),
            port: env_parse("PARAMVAULT_API_PORT", 8080),
        }
    }

    /// Get the socket address string the server binds to
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL (`sqlite://...`)
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_seconds: u64,
    /// Idle timeout in seconds (0 = no timeout)
    pub idle_timeout_seconds: u64,
    /// Run pending migrations on pool creation
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./data/paramvault.db".to_string(),
            max_connections: 10,
            min_connections: 0,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 600,
            auto_migrate: true,
        }
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env_var("DATABASE_URL").unwrap_or_else(|| "sqlite://./data/paramvault.db".into()),
            max_connections: env_parse("DATABASE_MAX_CONNECTIONS", 10),
            min_connections: env_parse("DATABASE_MIN_CONNECTIONS", 0),
            connect_timeout_seconds: env_parse("DATABASE_CONNECT_TIMEOUT_SECONDS", 10),
            idle_timeout_seconds: env_parse("DATABASE_IDLE_TIMEOUT_SECONDS", 600),
            auto_migrate: env_bool("DATABASE_AUTO_MIGRATE", true),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        if self.idle_timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.idle_timeout_seconds))
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite://")
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(Error::config("database URL cannot be empty"));
        }
        if !self.is_sqlite() {
            return Err(Error::config("database URL must start with 'sqlite://'"));
        }
        if self.max_connections == 0 {
            return Err(Error::config("max_connections must be greater than 0"));
        }
        if self.min_connections > self.max_connections {
            return Err(Error::config("min_connections cannot exceed max_connections"));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit logs as JSON lines
    pub json_format: bool,
    pub service_name: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_format: false,
            service_name: "paramvault".to_string(),
        }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self {
            log_level: env_var("PARAMVAULT_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            json_format: env_bool("PARAMVAULT_LOG_JSON", false),
            service_name: "paramvault".to_string(),
        }
    }
}

/// Key-management backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KmsBackend {
    /// In-process AES-256-GCM keyed from configuration (dev/test)
    Local,
    /// Vault transit engine
    Vault,
}

/// Key-management service configuration
#[derive(Debug, Clone)]
pub struct KmsConfig {
    pub backend: KmsBackend,
    /// Key identifier passed to the key service and to secure remote writes.
    /// Required: absence is a startup configuration error.
    pub key_id: String,
    /// Hex-encoded 256-bit master key for the local backend
    pub master_key_hex: Option<String>,
    /// Transit engine mount path for the vault backend
    pub transit_mount: String,
}

impl KmsConfig {
    pub fn from_env() -> Result<Self> {
        let key_id = env_var("PARAMVAULT_KMS_KEY_ID").ok_or_else(|| {
            Error::config("PARAMVAULT_KMS_KEY_ID must be set (key-management key identifier)")
        })?;

        let backend = match env_var("PARAMVAULT_KMS_BACKEND").as_deref() {
            None | Some("local") => KmsBackend::Local,
            Some("vault") => KmsBackend::Vault,
            Some(other) => {
                return Err(Error::config(format!(
                    "Unknown PARAMVAULT_KMS_BACKEND '{}', expected 'local' or 'vault'",
                    other
                )))
            }
        };

        Ok(Self {
            backend,
            key_id,
            master_key_hex: env_var("PARAMVAULT_KMS_MASTER_KEY"),
            transit_mount: env_var("PARAMVAULT_TRANSIT_MOUNT")
                .unwrap_or_else(|| "transit".to_string()),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.key_id.is_empty() {
            return Err(Error::config("KMS key id cannot be empty"));
        }
        if self.backend == KmsBackend::Local {
            let key = self.master_key_hex.as_deref().ok_or_else(|| {
                Error::config("PARAMVAULT_KMS_MASTER_KEY must be set for the local KMS backend")
            })?;
            let decoded = hex::decode(key)
                .map_err(|_| Error::config("PARAMVAULT_KMS_MASTER_KEY must be hex-encoded"))?;
            if decoded.len() != 32 {
                return Err(Error::config(
                    "PARAMVAULT_KMS_MASTER_KEY must decode to exactly 32 bytes",
                ));
            }
        }
        Ok(())
    }
}

/// Remote parameter-store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-memory store (dev/test)
    Memory,
    /// Vault KV v2 engine
    Vault,
}

/// Remote parameter-store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// KV v2 mount path for the vault backend
    pub mount: String,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        let backend = match env_var("PARAMVAULT_STORE_BACKEND").as_deref() {
            None | Some("memory") => StoreBackend::Memory,
            Some("vault") => StoreBackend::Vault,
            Some(other) => {
                return Err(Error::config(format!(
                    "Unknown PARAMVAULT_STORE_BACKEND '{}', expected 'memory' or 'vault'",
                    other
                )))
            }
        };

        Ok(Self {
            backend,
            mount: env_var("PARAMVAULT_STORE_MOUNT").unwrap_or_else(|| "secret".to_string()),
        })
    }
}

/// Shared Vault connection settings
#[derive(Debug, Clone)]
pub struct VaultSettings {
    pub address: String,
    pub token: Option<String>,
    pub namespace: Option<String>,
}

impl VaultSettings {
    pub fn from_env() -> Result<Self> {
        let address = env_var("VAULT_ADDR").ok_or_else(|| {
            Error::config("VAULT_ADDR must be set when a vault backend is selected")
        })?;

        Ok(Self {
            address,
            token: env_var("VAULT_TOKEN"),
            namespace: env_var("VAULT_NAMESPACE"),
        })
    }
}
