//! # Observability
//!
//! Structured logging setup for the paramvault API using the tracing
//! ecosystem. Secret plaintext never reaches a span or event: all decrypted
//! values travel as [`crate::domain::SecretString`], which redacts itself.

use crate::config::ObservabilityConfig;
use crate::errors::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured default filter. Returns an
/// error if a subscriber is already installed, so tests calling this twice
/// should ignore the result.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| Error::config(format!("Invalid log filter '{}': {}", config.log_level, e)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| Error::config(format!("Failed to initialize tracing: {}", e)))
}

/// Log the effective configuration at startup. Key material and tokens are
/// deliberately absent.
pub fn log_config_info(config: &crate::config::AppConfig) {
    tracing::info!(
        api_address = %config.api.socket_addr(),
        database = "sqlite",
        kms_backend = ?config.kms.backend,
        store_backend = ?config.store.backend,
        key_id = %config.kms.key_id,
        "paramvault configuration loaded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent_enough() {
        let config = ObservabilityConfig::default();
        // First call may succeed or fail depending on test ordering; the
        // second must fail because a subscriber is installed.
        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let config = ObservabilityConfig {
            log_level: "not a [valid] filter!!!".to_string(),
            ..Default::default()
        };
        // RUST_LOG may override the invalid filter; only assert when it's unset.
        if std::env::var("RUST_LOG").is_err() {
            assert!(init_tracing(&config).is_err());
        }
    }
}
