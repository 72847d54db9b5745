//! Public projections of threads and replies.
//!
//! These are the only shapes that leave the service. They carry no
//! `delete_password` and no `reported` field, so nothing secret can be
//! serialized by accident.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::reply::Reply;
use super::thread::Thread;

/// A reply as shown to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyView {
    /// Reply ID.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Reply body (or the redaction text).
    pub text: String,
    /// Creation timestamp.
    pub created_on: DateTime<Utc>,
}

impl From<&Reply> for ReplyView {
    fn from(reply: &Reply) -> Self {
        Self {
            id: reply.id,
            text: reply.text.clone(),
            created_on: reply.created_on,
        }
    }
}

/// A thread with every reply, as returned by the thread detail endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadView {
    /// Thread ID.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Board name.
    pub board: String,
    /// Thread body.
    pub text: String,
    /// Creation timestamp.
    pub created_on: DateTime<Utc>,
    /// Last bump timestamp.
    pub bumped_on: DateTime<Utc>,
    /// All replies in creation order.
    pub replies: Vec<ReplyView>,
}

impl From<&Thread> for ThreadView {
    fn from(thread: &Thread) -> Self {
        Self {
            id: thread.id,
            board: thread.board.clone(),
            text: thread.text.clone(),
            created_on: thread.created_on,
            bumped_on: thread.bumped_on,
            replies: thread.replies.iter().map(ReplyView::from).collect(),
        }
    }
}

/// A thread as shown in a board listing.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadPreview {
    /// Thread ID.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Board name.
    pub board: String,
    /// Thread body.
    pub text: String,
    /// Creation timestamp.
    pub created_on: DateTime<Utc>,
    /// Last bump timestamp.
    pub bumped_on: DateTime<Utc>,
    /// Preview replies.
    pub replies: Vec<ReplyView>,
    /// Reply count shown next to the preview.
    pub replycount: usize,
}
