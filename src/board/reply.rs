//! Reply model for anonbbs.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Reply entity embedded in a thread.
#[derive(Debug, Clone)]
pub struct Reply {
    /// Unique reply ID.
    pub id: Uuid,
    /// Reply body. Replaced by the redaction text when deleted.
    pub text: String,
    /// Creation timestamp.
    pub created_on: DateTime<Utc>,
    /// Secret required to redact the reply.
    pub delete_password: String,
    /// Whether the reply has been reported.
    pub reported: bool,
}

impl Reply {
    /// Build a reply from creation data.
    ///
    /// Each call draws a fresh ID.
    pub fn from_new(new_reply: &NewReply, created_on: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: new_reply.text.clone(),
            created_on,
            delete_password: new_reply.delete_password.clone(),
            reported: false,
        }
    }
}

/// Data for creating a new reply.
#[derive(Debug, Clone)]
pub struct NewReply {
    /// Reply body.
    pub text: String,
    /// Secret required to redact the reply.
    pub delete_password: String,
}

impl NewReply {
    /// Create a new reply with required fields.
    pub fn new(text: impl Into<String>, delete_password: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delete_password: delete_password.into(),
        }
    }
}
