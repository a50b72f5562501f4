//! Archive download handler.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{debug, error};
use zipper_core::Task;

use super::handlers::{orchestrator_error, ApiError, ErrorResponse};
use crate::state::AppState;

/// Serve the archive of a completed task (`task-<id>.zip`).
pub async fn download_archive(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(id) = Task::id_from_archive_file_name(&name) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!("invalid archive name: {}", name))),
        ));
    };

    let path = state
        .orchestrator()
        .archive_location(id)
        .map_err(orchestrator_error)?;

    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            debug!(task_id = id, path = %path.display(), "Archive file missing");
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(format!("archive for task {} is missing", id))),
            )
        } else {
            error!(task_id = id, error = %e, "Failed to read archive");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("failed to read archive")),
            )
        }
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", name),
            ),
        ],
        bytes,
    ))
}
