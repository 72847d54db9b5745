//! Reply handlers for the board API.

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::board::{DeleteOutcome, ThreadView};
use crate::web::dto::{
    CreateReplyRequest, DeleteReplyRequest, Payload, ReportReplyRequest, ThreadQuery,
};
use crate::web::error::ApiError;
use crate::web::handlers::{redirect_to_board, AppState, INCORRECT_PASSWORD, REPORTED, SUCCESS};

/// POST /api/replies/:board - Reply to a thread.
pub async fn create_reply(
    State(state): State<Arc<AppState>>,
    Path(board): Path<String>,
    Payload(req): Payload<CreateReplyRequest>,
) -> Result<Response, ApiError> {
    state
        .board
        .create_reply(&req.thread_id, &req.text, &req.delete_password)
        .await?;
    let thread_id = urlencoding::encode(req.thread_id.trim()).into_owned();
    Ok(redirect_to_board(&board, &thread_id))
}

/// GET /api/replies/:board?thread_id= - Get a thread with all replies.
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ThreadQuery>,
) -> Result<Json<ThreadView>, ApiError> {
    let thread = state.board.get_thread(&query.thread_id).await?;
    Ok(Json(thread))
}

/// DELETE /api/replies/:board - Redact a reply with its password.
pub async fn delete_reply(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<DeleteReplyRequest>,
) -> Result<&'static str, ApiError> {
    let outcome = state
        .board
        .redact_reply(&req.thread_id, &req.reply_id, &req.delete_password)
        .await?;
    Ok(match outcome {
        DeleteOutcome::Deleted => SUCCESS,
        DeleteOutcome::IncorrectPassword => INCORRECT_PASSWORD,
    })
}

/// PUT /api/replies/:board - Report a reply.
pub async fn report_reply(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<ReportReplyRequest>,
) -> Result<&'static str, ApiError> {
    state
        .board
        .report_reply(&req.thread_id, &req.reply_id)
        .await?;
    Ok(REPORTED)
}
