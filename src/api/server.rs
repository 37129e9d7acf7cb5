use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ApiServerConfig;
use crate::errors::Error;
use crate::pipeline::SecretPipeline;

use super::routes::build_router;

pub async fn start_api_server(
    config: ApiServerConfig,
    pipeline: Arc<SecretPipeline>,
) -> crate::Result<()> {
    let addr: SocketAddr = config
        .socket_addr()
        .parse()
        .map_err(|e| Error::config(format!("Invalid API address: {}", e)))?;
    let router: Router = build_router(pipeline);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind API server on {}: {}", addr, e)))?;

    info!(address = %addr, "Starting HTTP API server");
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "API server shutdown listener failed");
            }
        })
        .await
        .map_err(|e| Error::config(format!("API server error: {}", e)))?;

    info!("API server shutdown completed");
    Ok(())
}
