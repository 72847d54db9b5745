//! Thread repository for anonbbs.
//!
//! Threads and their replies live in two tables. Every mutation below is a
//! single statement or a single transaction, so concurrent requests against
//! the same thread never lose an update, and conditional updates have at
//! most one winner.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::QueryBuilder;
use uuid::Uuid;

use super::reply::{NewReply, Reply};
use super::thread::{NewThread, Thread};
use crate::datetime;
use crate::db::DbPool;
use crate::{BbsError, Result};

#[derive(sqlx::FromRow)]
struct ThreadRow {
    id: String,
    board: String,
    text: String,
    created_on: String,
    bumped_on: String,
    reported: bool,
    delete_password: String,
}

impl ThreadRow {
    fn into_thread(self, replies: Vec<Reply>) -> Result<Thread> {
        Ok(Thread {
            id: parse_stored_id(&self.id)?,
            board: self.board,
            text: self.text,
            created_on: datetime::from_db(&self.created_on)?,
            bumped_on: datetime::from_db(&self.bumped_on)?,
            reported: self.reported,
            delete_password: self.delete_password,
            replies,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ReplyRow {
    id: String,
    thread_id: String,
    text: String,
    created_on: String,
    reported: bool,
    delete_password: String,
}

impl TryFrom<ReplyRow> for Reply {
    type Error = BbsError;

    fn try_from(row: ReplyRow) -> Result<Self> {
        Ok(Reply {
            id: parse_stored_id(&row.id)?,
            text: row.text,
            created_on: datetime::from_db(&row.created_on)?,
            delete_password: row.delete_password,
            reported: row.reported,
        })
    }
}

fn parse_stored_id(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| BbsError::Database(format!("invalid stored id {s:?}: {e}")))
}

const THREAD_COLUMNS: &str =
    "SELECT id, board, text, created_on, bumped_on, reported, delete_password FROM threads";

const REPLY_COLUMNS: &str =
    "SELECT id, thread_id, text, created_on, reported, delete_password FROM replies";

/// Repository for thread and reply persistence.
pub struct ThreadRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ThreadRepository<'a> {
    /// Create a new ThreadRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new thread.
    ///
    /// Returns the created thread with a freshly generated ID and
    /// `created_on == bumped_on`.
    pub async fn create(&self, new_thread: &NewThread) -> Result<Thread> {
        let now = datetime::now();
        let thread = Thread {
            id: Uuid::new_v4(),
            board: new_thread.board.clone(),
            text: new_thread.text.clone(),
            created_on: now,
            bumped_on: now,
            reported: false,
            delete_password: new_thread.delete_password.clone(),
            replies: Vec::new(),
        };

        sqlx::query(
            "INSERT INTO threads (id, board, text, created_on, bumped_on, reported, delete_password)
             VALUES (?, ?, ?, ?, ?, 0, ?)",
        )
        .bind(thread.id.to_string())
        .bind(&thread.board)
        .bind(&thread.text)
        .bind(datetime::to_db(&thread.created_on))
        .bind(datetime::to_db(&thread.bumped_on))
        .bind(&thread.delete_password)
        .execute(self.pool)
        .await?;

        Ok(thread)
    }

    /// Get a thread and all of its replies by ID.
    ///
    /// Both reads run in one transaction and see the same snapshot.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Thread>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ThreadRow>(&format!("{THREAD_COLUMNS} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            tx.commit().await?;
            return Ok(None);
        };

        let replies = sqlx::query_as::<_, ReplyRow>(&format!(
            "{REPLY_COLUMNS} WHERE thread_id = ? ORDER BY seq"
        ))
        .bind(id.to_string())
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        let replies = replies
            .into_iter()
            .map(Reply::try_from)
            .collect::<Result<Vec<_>>>()?;
        row.into_thread(replies).map(Some)
    }

    /// List the most recently bumped threads of a board, with their replies.
    pub async fn list_by_board(&self, board: &str, limit: i64) -> Result<Vec<Thread>> {
        let rows = sqlx::query_as::<_, ThreadRow>(&format!(
            "{THREAD_COLUMNS} WHERE board = ? ORDER BY bumped_on DESC, rowid DESC LIMIT ?"
        ))
        .bind(board)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new(format!("{REPLY_COLUMNS} WHERE thread_id IN ("));
        let mut separated = query.separated(", ");
        for row in &rows {
            separated.push_bind(row.id.clone());
        }
        query.push(") ORDER BY thread_id, seq");

        let mut replies: HashMap<String, Vec<Reply>> = HashMap::new();
        for reply_row in query
            .build_query_as::<ReplyRow>()
            .fetch_all(self.pool)
            .await?
        {
            let thread_id = reply_row.thread_id.clone();
            replies
                .entry(thread_id)
                .or_default()
                .push(Reply::try_from(reply_row)?);
        }

        rows.into_iter()
            .map(|row| {
                let thread_replies = replies.remove(&row.id).unwrap_or_default();
                row.into_thread(thread_replies)
            })
            .collect()
    }

    /// Delete a thread if the password matches.
    ///
    /// Returns true if a thread was deleted, false if it does not exist or
    /// the password is wrong. Replies are removed with the thread.
    pub async fn delete_with_password(&self, id: Uuid, delete_password: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM threads WHERE id = ? AND delete_password = ?")
            .bind(id.to_string())
            .bind(delete_password)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a thread as reported.
    ///
    /// Returns false if the thread does not exist.
    pub async fn report(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("UPDATE threads SET reported = 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Append a reply to a thread and bump the thread.
    ///
    /// Both writes happen in one transaction. `bumped_on` never moves
    /// backwards, even if the clock does. Returns None if the thread does
    /// not exist.
    pub async fn add_reply(&self, thread_id: Uuid, new_reply: &NewReply) -> Result<Option<Reply>> {
        self.add_reply_at(thread_id, new_reply, datetime::now()).await
    }

    async fn add_reply_at(
        &self,
        thread_id: Uuid,
        new_reply: &NewReply,
        now: DateTime<Utc>,
    ) -> Result<Option<Reply>> {
        let reply = Reply::from_new(new_reply, now);
        let stamp = datetime::to_db(&now);
        let mut tx = self.pool.begin().await?;

        let bumped = sqlx::query("UPDATE threads SET bumped_on = MAX(bumped_on, ?) WHERE id = ?")
            .bind(&stamp)
            .bind(thread_id.to_string())
            .execute(&mut *tx)
            .await?;

        if bumped.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        sqlx::query(
            "INSERT INTO replies (id, thread_id, seq, text, created_on, reported, delete_password)
             VALUES (?, ?, (SELECT COALESCE(MAX(seq), 0) + 1 FROM replies WHERE thread_id = ?), ?, ?, 0, ?)",
        )
        .bind(reply.id.to_string())
        .bind(thread_id.to_string())
        .bind(thread_id.to_string())
        .bind(&reply.text)
        .bind(&stamp)
        .bind(&reply.delete_password)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(reply))
    }

    /// Replace the text of a reply if thread, reply and password all match.
    ///
    /// Returns false when nothing matched. A missing thread, a missing reply
    /// and a wrong password all look the same to the caller.
    pub async fn redact_reply(
        &self,
        thread_id: Uuid,
        reply_id: Uuid,
        delete_password: &str,
        redaction_text: &str,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE replies SET text = ? WHERE thread_id = ? AND id = ? AND delete_password = ?",
        )
        .bind(redaction_text)
        .bind(thread_id.to_string())
        .bind(reply_id.to_string())
        .bind(delete_password)
        .execute(self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a reply as reported.
    ///
    /// Returns false if the thread/reply pair does not exist.
    pub async fn report_reply(&self, thread_id: Uuid, reply_id: Uuid) -> Result<bool> {
        let result = sqlx::query("UPDATE replies SET reported = 1 WHERE thread_id = ? AND id = ?")
            .bind(thread_id.to_string())
            .bind(reply_id.to_string())
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
