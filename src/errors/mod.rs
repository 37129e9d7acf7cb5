//! # Error Handling
//!
//! Error types for the paramvault API, built on `thiserror`.

mod types;

pub use types::{Error, Result};
