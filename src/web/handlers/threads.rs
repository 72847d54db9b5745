//! Thread handlers for the board API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::board::{DeleteOutcome, ThreadPreview};
use crate::web::dto::{CreateThreadRequest, DeleteThreadRequest, Payload, ReportThreadRequest};
use crate::web::error::ApiError;
use crate::web::handlers::{redirect_to_board, AppState, INCORRECT_PASSWORD, REPORTED, SUCCESS};

/// POST /api/threads/:board - Create a thread.
pub async fn create_thread(
    State(state): State<Arc<AppState>>,
    Path(board): Path<String>,
    Payload(req): Payload<CreateThreadRequest>,
) -> Result<Response, ApiError> {
    state
        .board
        .create_thread(&board, &req.text, &req.delete_password)
        .await?;
    Ok(redirect_to_board(&board, ""))
}

/// GET /api/threads/:board - List recently bumped threads.
pub async fn list_threads(
    State(state): State<Arc<AppState>>,
    Path(board): Path<String>,
) -> Result<Json<Vec<ThreadPreview>>, ApiError> {
    let threads = state.board.list_threads(&board).await?;
    Ok(Json(threads))
}

/// PUT /api/threads/:board - Report a thread.
pub async fn report_thread(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<ReportThreadRequest>,
) -> Result<Response, ApiError> {
    let thread_id = req
        .thread_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing thread_id"))?;

    if state.board.report_thread(&thread_id).await? {
        return Ok(REPORTED.into_response());
    }
    if state.board.config().strict_report_not_found {
        return Err(ApiError::not_found("thread not found"));
    }
    Ok((StatusCode::NOT_FOUND, REPORTED).into_response())
}

/// DELETE /api/threads/:board - Delete a thread with its password.
pub async fn delete_thread(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<DeleteThreadRequest>,
) -> Result<&'static str, ApiError> {
    let outcome = state
        .board
        .delete_thread(&req.thread_id, &req.delete_password)
        .await?;
    Ok(match outcome {
        DeleteOutcome::Deleted => SUCCESS,
        DeleteOutcome::IncorrectPassword => INCORRECT_PASSWORD,
    })
}
