//! Error types for the paramvault parameter-management API.
//!
//! Error messages may reference a parameter *name* but must never contain a
//! submitted or decrypted parameter *value*.

/// Custom result type for paramvault operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the paramvault API
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors: fatal at startup, never per-request
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input, rejected before any side effect
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Database and storage errors
    #[error("Database error: {context}")]
    Database {
        #[source]
        source: sqlx::Error,
        context: String,
    },

    /// I/O errors with additional context
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },

    /// Key-management encrypt/decrypt failure, recoverable per record
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Remote parameter-store failure, recoverable per record
    #[error("Remote store error: {0}")]
    RemoteStore(String),

    /// Resource conflict errors (e.g., secret flag flip on an existing name)
    #[error("Resource conflict: {message}")]
    Conflict { message: String },

    /// Resource not found errors
    #[error("Resource not found: {resource_type} '{id}'")]
    NotFound { resource_type: String, id: String },
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a validation error with field information
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a database error with context
    pub fn database<S: Into<String>>(source: sqlx::Error, context: S) -> Self {
        Self::Database {
            source,
            context: context.into(),
        }
    }

    /// Create a crypto error
    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto(message.into())
    }

    /// Create a remote store error
    pub fn remote_store<S: Into<String>>(message: S) -> Self {
        Self::RemoteStore(message.into())
    }

    /// Create a conflict error
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<R: Into<String>, I: Into<String>>(resource_type: R, id: I) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Stable kind string, used in per-record acknowledgment slots
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Validation { .. } => "validation",
            Error::Database { .. } => "database",
            Error::Io { .. } => "io",
            Error::Crypto(_) => "crypto",
            Error::RemoteStore(_) => "remote_store",
            Error::Conflict { .. } => "conflict",
            Error::NotFound { .. } => "not_found",
        }
    }

    /// Get the HTTP status code that should be returned for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Config(_) => 500,
            Error::Validation { .. } => 400,
            Error::Database { .. } => 500,
            Error::Io { .. } => 500,
            Error::Crypto(_) => 502,
            Error::RemoteStore(_) => 502,
            Error::Conflict { .. } => 409,
            Error::NotFound { .. } => 404,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(error: sqlx::Error) -> Self {
        Self::Database {
            source: error,
            context: "Database operation failed".to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            source: error,
            context: "I/O operation failed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = Error::config("missing key id");
        assert!(matches!(error, Error::Config(_)));
        assert_eq!(error.to_string(), "Configuration error: missing key id");
    }

    #[test]
    fn test_validation_error_field() {
        let error = Error::validation_field("username is required", "username");
        if let Error::Validation { field, .. } = error {
            assert_eq!(field, Some("username".to_string()));
        } else {
            panic!("expected validation error");
        }
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Error::validation("x").kind(), "validation");
        assert_eq!(Error::crypto("x").kind(), "crypto");
        assert_eq!(Error::remote_store("x").kind(), "remote_store");
        assert_eq!(Error::conflict("x").kind(), "conflict");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::validation("x").status_code(), 400);
        assert_eq!(Error::conflict("x").status_code(), 409);
        assert_eq!(Error::not_found("parameter", "/a/b").status_code(), 404);
        assert_eq!(Error::crypto("x").status_code(), 502);
        assert_eq!(Error::config("x").status_code(), 500);
    }

    #[test]
    fn test_error_conversions() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io { .. }));
    }
}
