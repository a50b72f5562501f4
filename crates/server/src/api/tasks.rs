//! Task API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use zipper_core::{FileStatus, TaskId, TaskStatusView};

use super::handlers::{orchestrator_error, ApiError};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for task creation
#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    pub id: TaskId,
}

/// Request body for attaching a file
#[derive(Debug, Deserialize)]
pub struct AddFileBody {
    pub url: String,
}

/// Response for attaching a file
#[derive(Debug, Serialize)]
pub struct AddFileResponse {
    pub status: FileStatus,
    /// Why the file was rejected, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a new task
pub async fn create_task(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<CreateTaskResponse>), ApiError> {
    let id = state
        .orchestrator()
        .create_task()
        .map_err(orchestrator_error)?;

    Ok((StatusCode::CREATED, Json(CreateTaskResponse { id })))
}

/// Attach a file to a task
pub async fn add_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TaskId>,
    Json(body): Json<AddFileBody>,
) -> Result<Json<AddFileResponse>, ApiError> {
    let attached = state
        .orchestrator()
        .add_file(id, &body.url)
        .await
        .map_err(orchestrator_error)?;

    Ok(Json(AddFileResponse {
        status: attached.status,
        error: attached.rejection.map(|r| r.to_string()),
    }))
}

/// Get task status
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TaskId>,
) -> Result<Json<TaskStatusView>, ApiError> {
    state
        .orchestrator()
        .task_status(id)
        .map(Json)
        .map_err(orchestrator_error)
}
