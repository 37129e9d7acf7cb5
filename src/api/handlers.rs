//! HTTP handlers for the parameter-management surface.

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::api::dto::{ParameterView, UpdateView};
use crate::api::error::ApiError;
use crate::api::routes::AppState;
use crate::domain::ChangeSubmission;
use crate::pipeline::{redact, RecordAck};

/// `GET /healthcheck` - liveness probe.
pub async fn healthcheck() -> &'static str {
    "Working"
}

/// `GET /params` - list the full parameter catalog, redacted.
pub async fn list_params(
    State(state): State<AppState>,
) -> Result<Json<Vec<ParameterView>>, ApiError> {
    let params = state.pipeline.parameters().list().await?;
    let views: Vec<ParameterView> = params.into_iter().map(ParameterView::from).collect();
    Ok(Json(redact(views)))
}

/// `GET /updates` - list the audit timeline, redacted.
pub async fn list_updates(
    State(state): State<AppState>,
) -> Result<Json<Vec<UpdateView>>, ApiError> {
    let updates = state.pipeline.update_log().list().await?;
    let views: Vec<UpdateView> = updates.into_iter().map(UpdateView::from).collect();
    Ok(Json(redact(views)))
}

/// `POST /params` - apply a batch of change submissions.
///
/// Per-record outcomes come back positionally aligned with the request body.
/// The status is 200 when every record stored and 207 when at least one
/// failed; the batch itself is never rejected for a single bad record.
pub async fn apply_params(
    State(state): State<AppState>,
    Json(batch): Json<Vec<ChangeSubmission>>,
) -> (StatusCode, Json<Vec<RecordAck>>) {
    let total = batch.len();
    let acks = state.pipeline.apply(batch).await;
    let stored = acks.iter().filter(|a| a.is_stored()).count();

    info!(total = total, stored = stored, "Change batch processed");

    let status = if stored == acks.len() { StatusCode::OK } else { StatusCode::MULTI_STATUS };
    (status, Json(acks))
}
