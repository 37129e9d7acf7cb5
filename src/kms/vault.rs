//! Vault transit key service backend.
//!
//! The transit engine exchanges base64 plaintext and opaque `vault:vN:...`
//! ciphertext tokens. The gateway base64-wraps the token so the client-facing
//! ciphertext boundary stays uniform across backends.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::fmt;
use vaultrs::client::{VaultClient, VaultClientSettingsBuilder};
use vaultrs::transit;

use super::KmsClient;
use crate::config::VaultSettings;
use crate::domain::SecretString;
use crate::errors::{Error, Result};

pub struct VaultTransitKms {
    client: VaultClient,
    mount: String,
    key_name: String,
}

impl fmt::Debug for VaultTransitKms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultTransitKms")
            .field("client", &"[VaultClient]")
            .field("mount", &self.mount)
            .field("key_name", &self.key_name)
            .finish()
    }
}

impl VaultTransitKms {
    /// Connect to Vault and verify it is reachable.
    pub async fn new(settings: &VaultSettings, mount: &str, key_name: &str) -> Result<Self> {
        if settings.address.is_empty() {
            return Err(Error::config("Vault address cannot be empty"));
        }

        let mut builder = VaultClientSettingsBuilder::default();
        builder.address(&settings.address);
        if let Some(ref token) = settings.token {
            builder.token(token);
        }
        if let Some(ref namespace) = settings.namespace {
            builder.namespace(Some(namespace.clone()));
        }

        let client_settings = builder
            .build()
            .map_err(|e| Error::config(format!("Invalid Vault configuration: {}", e)))?;
        let client = VaultClient::new(client_settings)
            .map_err(|e| Error::config(format!("Failed to create Vault client: {}", e)))?;

        match vaultrs::sys::health(&client).await {
            Ok(_) => {
                tracing::info!(address = %settings.address, mount = %mount, "Connected to Vault transit engine");
            }
            Err(e) => {
                tracing::error!(error = %e, address = %settings.address, "Vault health check failed");
                return Err(Error::config(format!("Vault health check failed: {}", e)));
            }
        }

        Ok(Self { client, mount: mount.to_string(), key_name: key_name.to_string() })
    }
}

#[async_trait]
impl KmsClient for VaultTransitKms {
    async fn encrypt(&self, plaintext: &SecretString) -> Result<String> {
        let encoded = BASE64.encode(plaintext.expose_secret().as_bytes());

        let response = transit::data::encrypt(&self.client, &self.mount, &self.key_name, &encoded, None)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, key = %self.key_name, "transit encrypt failed");
                Error::crypto(format!("transit encrypt failed: {}", e))
            })?;

        Ok(BASE64.encode(response.ciphertext.as_bytes()))
    }

    async fn decrypt(&self, ciphertext: &str) -> Result<SecretString> {
        let token_bytes = BASE64
            .decode(ciphertext)
            .map_err(|_| Error::crypto("ciphertext is not valid base64"))?;
        let token = String::from_utf8(token_bytes)
            .map_err(|_| Error::crypto("ciphertext envelope is malformed"))?;

        let response = transit::data::decrypt(&self.client, &self.mount, &self.key_name, &token, None)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, key = %self.key_name, "transit decrypt failed");
                Error::crypto(format!("transit decrypt failed: {}", e))
            })?;

        let plaintext = BASE64
            .decode(&response.plaintext)
            .map_err(|_| Error::crypto("transit returned malformed plaintext encoding"))?;
        let value = String::from_utf8(plaintext)
            .map_err(|_| Error::crypto("decrypted value is not valid UTF-8"))?;

        Ok(SecretString::new(value))
    }
}
