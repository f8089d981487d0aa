use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::events::{process_batch, BatchSummary};
use crate::rotation::RotationOutcome;

use super::error::ApiError;
use super::routes::ApiState;

#[derive(Debug, Serialize)]
pub struct RotateResponse {
    pub message: String,
    pub outcome: RotationOutcome,
}

/// Run one rotation with the server's configured parameters.
///
/// Any completed rotation, including a degraded one where the old credential
/// could not be retired, is a 200; a rotation that stored no new secret is a
/// 502 so the caller knows to retry.
pub async fn rotate_handler(
    State(state): State<ApiState>,
) -> Result<(StatusCode, Json<RotateResponse>), ApiError> {
    info!(
        app_id = %state.request.app_object_id,
        secret_name = %state.request.secret_name,
        "HTTP trigger received"
    );

    let outcome = state.rotator.rotate(&state.request).await.map_err(ApiError::from)?;

    let (status, message) = if outcome.failed() {
        (StatusCode::BAD_GATEWAY, "rotation failed; no new secret was stored".to_string())
    } else if outcome.fully_rotated() {
        (StatusCode::OK, "credential rotated and previous credential retired".to_string())
    } else {
        (StatusCode::OK, "new credential stored".to_string())
    };

    Ok((status, Json(RotateResponse { message, outcome })))
}

/// Accept a batch of expiry notifications.
///
/// The batch is acknowledged as a whole (200) regardless of individual event
/// outcomes; per-event dispositions are reported in the body.
pub async fn events_handler(
    State(state): State<ApiState>,
    Json(raw_events): Json<Vec<Value>>,
) -> (StatusCode, Json<BatchSummary>) {
    info!(count = raw_events.len(), "Event batch received");

    let summary = process_batch(&state.rotator, &state.request, &raw_events).await;
    (StatusCode::OK, Json(summary))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Report vault reachability.
pub async fn health_handler(
    State(state): State<ApiState>,
) -> Result<Json<HealthResponse>, ApiError> {
    state
        .vault
        .health_check()
        .await
        .map_err(|err| ApiError::service_unavailable(err.to_string()))?;
    Ok(Json(HealthResponse { status: "ok" }))
}
