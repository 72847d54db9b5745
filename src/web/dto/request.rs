//! Request DTOs for the board API.
//!
//! Fields default when absent. Missing ids behave like unknown ids, and
//! missing text fields are stored as empty strings.

use serde::Deserialize;

/// POST /api/threads/:board
#[derive(Debug, Default, Deserialize)]
pub struct CreateThreadRequest {
    /// Thread body.
    #[serde(default)]
    pub text: String,
    /// Secret required to delete the thread later.
    #[serde(default)]
    pub delete_password: String,
}

/// DELETE /api/threads/:board
#[derive(Debug, Default, Deserialize)]
pub struct DeleteThreadRequest {
    /// Thread to delete.
    #[serde(default)]
    pub thread_id: String,
    /// Password given at creation.
    #[serde(default)]
    pub delete_password: String,
}

/// PUT /api/threads/:board
#[derive(Debug, Default, Deserialize)]
pub struct ReportThreadRequest {
    /// Thread to report.
    #[serde(default)]
    pub thread_id: Option<String>,
}

/// POST /api/replies/:board
#[derive(Debug, Default, Deserialize)]
pub struct CreateReplyRequest {
    /// Thread to reply to.
    #[serde(default)]
    pub thread_id: String,
    /// Reply body.
    #[serde(default)]
    pub text: String,
    /// Secret required to redact the reply later.
    #[serde(default)]
    pub delete_password: String,
}

/// GET /api/replies/:board query string.
#[derive(Debug, Default, Deserialize)]
pub struct ThreadQuery {
    /// Thread to fetch.
    #[serde(default)]
    pub thread_id: String,
}

/// DELETE /api/replies/:board
#[derive(Debug, Default, Deserialize)]
pub struct DeleteReplyRequest {
    /// Thread containing the reply.
    #[serde(default)]
    pub thread_id: String,
    /// Reply to redact.
    #[serde(default)]
    pub reply_id: String,
    /// Password given at creation.
    #[serde(default)]
    pub delete_password: String,
}

/// PUT /api/replies/:board
#[derive(Debug, Default, Deserialize)]
pub struct ReportReplyRequest {
    /// Thread containing the reply.
    #[serde(default)]
    pub thread_id: String,
    /// Reply to report.
    #[serde(default)]
    pub reply_id: String,
}
