use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;
use zipper_core::OrchestratorError;

use crate::metrics::{collect_dynamic_metrics, encode_metrics};
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Error response body shared by all API handlers.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map an orchestrator error to its HTTP status and body.
pub fn orchestrator_error(err: OrchestratorError) -> ApiError {
    let status = match &err {
        OrchestratorError::AdmissionRejected { .. } => StatusCode::TOO_MANY_REQUESTS,
        OrchestratorError::TaskNotFound(_) | OrchestratorError::ArchiveNotReady(_) => {
            StatusCode::NOT_FOUND
        }
        OrchestratorError::FileLimitExceeded { .. }
        | OrchestratorError::AlreadyProcessed { .. } => StatusCode::CONFLICT,
        OrchestratorError::QueueClosed(_) => StatusCode::SERVICE_UNAVAILABLE,
        OrchestratorError::Store(_) => {
            error!(error = %err, "Task store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::new(err.to_string())))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Prometheus text exposition of all registered metrics.
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    collect_dynamic_metrics(&state);

    match encode_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        ),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain")],
                String::new(),
            )
        }
    }
}
