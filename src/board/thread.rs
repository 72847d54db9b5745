//! Thread model for anonbbs.
//!
//! A thread is the aggregate root of a board: it owns its replies by value
//! and every mutation of a reply goes through the thread it belongs to.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::reply::Reply;

/// Thread entity representing a top-level post on a board.
#[derive(Debug, Clone)]
pub struct Thread {
    /// Unique thread ID.
    pub id: Uuid,
    /// Name of the board this thread belongs to.
    pub board: String,
    /// Thread body.
    pub text: String,
    /// Creation timestamp.
    pub created_on: DateTime<Utc>,
    /// Last activity timestamp, moved forward whenever a reply is added.
    pub bumped_on: DateTime<Utc>,
    /// Whether the thread has been reported.
    pub reported: bool,
    /// Secret required to delete the thread.
    pub delete_password: String,
    /// Replies in creation order.
    pub replies: Vec<Reply>,
}

impl Thread {
    /// Number of replies in the thread, redacted ones included.
    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }

    /// Find a reply by ID.
    pub fn reply(&self, reply_id: Uuid) -> Option<&Reply> {
        self.replies.iter().find(|r| r.id == reply_id)
    }
}

/// Data for creating a new thread.
#[derive(Debug, Clone)]
pub struct NewThread {
    /// Board to create the thread in.
    pub board: String,
    /// Thread body.
    pub text: String,
    /// Secret required to delete the thread.
    pub delete_password: String,
}

impl NewThread {
    /// Create a new thread with required fields.
    pub fn new(
        board: impl Into<String>,
        text: impl Into<String>,
        delete_password: impl Into<String>,
    ) -> Self {
        Self {
            board: board.into(),
            text: text.into(),
            delete_password: delete_password.into(),
        }
    }
}
