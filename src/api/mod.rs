//! # HTTP API
//!
//! The outward surface of the service: catalog and audit reads (redacted),
//! batch writes through the secret pipeline, and a liveness probe.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use routes::{build_router, AppState};
pub use server::start_api_server;
