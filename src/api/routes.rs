use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::pipeline::SecretPipeline;

use super::handlers::{apply_params, healthcheck, list_params, list_updates};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SecretPipeline>,
}

pub fn build_router(pipeline: Arc<SecretPipeline>) -> Router {
    let state = AppState { pipeline };

    Router::new()
        .route("/params", get(list_params).post(apply_params))
        .route("/updates", get(list_updates))
        .route("/healthcheck", get(healthcheck))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
