//! HTTP transport.

use crate::{ApiError, AppState, QueueEvent, process_batch};
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde_json::json;
use tokentally_core::{ErrorBody, UsageRequest};
use tracing::instrument;

/// Creates the usage API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/usage", post(compute_usage))
        .route("/v1/usage/batch", post(compute_batch))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Compute usage for one record.
#[instrument(skip_all)]
async fn compute_usage(State(state): State<AppState>, body: String) -> Response {
    let request = match UsageRequest::from_json(&body) {
        Ok(request) => request,
        Err(e) => return ApiError::from(e).into_response(),
    };
    match state.engine().compute_usage(request).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Charge every record of a queue event.
#[instrument(skip_all)]
async fn compute_batch(State(state): State<AppState>, body: String) -> Response {
    let event = match QueueEvent::from_json(&body) {
        Ok(event) => event,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorBody::new(e.message))).into_response();
        }
    };
    let summary = process_batch(state.engine(), event, state.batch_concurrency()).await;
    (StatusCode::OK, Json(summary)).into_response()
}
