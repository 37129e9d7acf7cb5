//! Secure wrapper for plaintext parameter values.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::REDACTED;

/// A string wrapper that redacts its contents in Debug, Display, and
/// serialization, and zeroes its memory on drop.
///
/// Every decrypted parameter value travels through the pipeline as a
/// `SecretString`, so an accidental log statement or serialized response can
/// never leak plaintext. The actual value is only reachable through
/// [`SecretString::expose_secret`].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Expose the underlying value. Callers must not log or serialize the
    /// result.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Never the actual value
        serializer.serialize_str(REDACTED)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(SecretString(String::deserialize(deserializer)?))
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString({})", REDACTED)
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", REDACTED)
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_redact() {
        let secret = SecretString::new("secretpw");
        assert_eq!(format!("{:?}", secret), "SecretString(REDACTED)");
        assert_eq!(format!("{}", secret), "REDACTED");
    }

    #[test]
    fn test_serialization_redacts() {
        let secret = SecretString::new("secretpw");
        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(json, "\"REDACTED\"");
        assert!(!json.contains("secretpw"));
    }

    #[test]
    fn test_expose_secret() {
        let secret = SecretString::new("secretpw");
        assert_eq!(secret.expose_secret(), "secretpw");
    }

    #[test]
    fn test_deserialization_accepts_values() {
        let secret: SecretString = serde_json::from_str("\"actual-value\"").unwrap();
        assert_eq!(secret.expose_secret(), "actual-value");
    }

    #[test]
    fn test_equality() {
        assert_eq!(SecretString::new("a"), SecretString::new("a"));
        assert_ne!(SecretString::new("a"), SecretString::new("b"));
    }
}
