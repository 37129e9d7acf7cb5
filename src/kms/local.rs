//! In-process AES-256-GCM key service.
//!
//! Seals values with a random nonce prepended to the ciphertext+tag blob, the
//! whole blob base64-encoded. Suitable for development and tests; production
//! deployments point at the Vault transit backend instead.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use ring::rand::{SecureRandom, SystemRandom};
use std::fmt;

use super::KmsClient;
use crate::domain::SecretString;
use crate::errors::{Error, Result};

pub struct LocalKms {
    key: LessSafeKey,
    rng: SystemRandom,
}

impl fmt::Debug for LocalKms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalKms").field("key", &"[aes-256-gcm]").finish()
    }
}

impl LocalKms {
    /// Build from a hex-encoded 256-bit master key.
    pub fn new(master_key_hex: &str) -> Result<Self> {
        let key_bytes = hex::decode(master_key_hex)
            .map_err(|_| Error::config("KMS master key must be hex-encoded"))?;
        if key_bytes.len() != 32 {
            return Err(Error::config("KMS master key must decode to exactly 32 bytes"));
        }

        let unbound = UnboundKey::new(&AES_256_GCM, &key_bytes)
            .map_err(|_| Error::config("Failed to initialize AES-256-GCM key"))?;

        Ok(Self { key: LessSafeKey::new(unbound), rng: SystemRandom::new() })
    }

    fn seal(&self, plaintext: &[u8]) -> Result<String> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| Error::crypto("nonce generation failed"))?;

        let mut in_out = plaintext.to_vec();
        self.key
            .seal_in_place_append_tag(
                Nonce::assume_unique_for_key(nonce_bytes),
                Aad::empty(),
                &mut in_out,
            )
            .map_err(|_| Error::crypto("encryption failed"))?;

        let mut blob = Vec::with_capacity(NONCE_LEN + in_out.len());
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&in_out);
        Ok(BASE64.encode(blob))
    }

    fn open(&self, ciphertext_b64: &str) -> Result<SecretString> {
        let blob = BASE64
            .decode(ciphertext_b64)
            .map_err(|_| Error::crypto("ciphertext is not valid base64"))?;

        if blob.len() < NONCE_LEN + AES_256_GCM.tag_len() {
            return Err(Error::crypto("ciphertext is too short"));
        }

        let (nonce_bytes, sealed) = blob.split_at(NONCE_LEN);
        let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
            .map_err(|_| Error::crypto("malformed nonce"))?;

        let mut in_out = sealed.to_vec();
        let plaintext = self
            .key
            .open_in_place(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| Error::crypto("decryption failed (bad ciphertext or wrong key)"))?;

        let value = std::str::from_utf8(plaintext)
            .map_err(|_| Error::crypto("decrypted value is not valid UTF-8"))?;
        Ok(SecretString::new(value))
    }
}

#[async_trait]
impl KmsClient for LocalKms {
    async fn encrypt(&self, plaintext: &SecretString) -> Result<String> {
        self.seal(plaintext.expose_secret().as_bytes())
    }

    async fn decrypt(&self, ciphertext: &str) -> Result<SecretString> {
        self.open(ciphertext)
    }
}
