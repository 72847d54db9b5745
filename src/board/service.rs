//! Board service for anonbbs.
//!
//! High-level thread and reply operations: creation, board listings with
//! reply previews, password-checked deletion and redaction, and reporting.
//! Identifiers arrive as raw strings from the HTTP layer; anything that is
//! not a valid ID is treated exactly like an unknown ID.

use uuid::Uuid;

use crate::config::{BoardConfig, ReplyCountMode};
use crate::db::Database;
use crate::{BbsError, Result};

use super::reply::{NewReply, Reply};
use super::thread::{NewThread, Thread};
use super::thread_repository::ThreadRepository;
use super::view::{ReplyView, ThreadPreview, ThreadView};

/// Result of a password-checked delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The password matched and the change was applied.
    Deleted,
    /// Nothing matched: unknown ID or wrong password.
    IncorrectPassword,
}

/// Parse a client-supplied identifier.
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

/// Build the listing projection of a thread.
///
/// Replies are sorted newest first and the last `preview_replies` of that
/// order are kept.
fn preview(thread: &Thread, config: &BoardConfig) -> ThreadPreview {
    let mut replies: Vec<&Reply> = thread.replies.iter().collect();
    replies.sort_by(|a, b| b.created_on.cmp(&a.created_on));
    let start = replies.len().saturating_sub(config.preview_replies);
    let replies: Vec<ReplyView> = replies[start..]
        .iter()
        .map(|reply| ReplyView::from(*reply))
        .collect();

    let replycount = match config.reply_count {
        ReplyCountMode::Preview => replies.len(),
        ReplyCountMode::Total => thread.reply_count(),
    };

    ThreadPreview {
        id: thread.id,
        board: thread.board.clone(),
        text: thread.text.clone(),
        created_on: thread.created_on,
        bumped_on: thread.bumped_on,
        replies,
        replycount,
    }
}

/// Service for thread and reply operations.
#[derive(Debug, Clone)]
pub struct BoardService {
    db: Database,
    config: BoardConfig,
}

impl BoardService {
    /// Create a new BoardService over an open database.
    pub fn new(db: Database, config: BoardConfig) -> Self {
        Self { db, config }
    }

    /// Get the board configuration.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    fn repo(&self) -> ThreadRepository<'_> {
        ThreadRepository::new(self.db.pool())
    }

    /// Create a thread on a board.
    pub async fn create_thread(
        &self,
        board: &str,
        text: &str,
        delete_password: &str,
    ) -> Result<Thread> {
        let thread = self
            .repo()
            .create(&NewThread::new(board, text, delete_password))
            .await?;
        tracing::debug!(board = %board, thread_id = %thread.id, "Thread created");
        Ok(thread)
    }

    /// List the most recently bumped threads of a board with reply previews.
    pub async fn list_threads(&self, board: &str) -> Result<Vec<ThreadPreview>> {
        let threads = self
            .repo()
            .list_by_board(board, i64::from(self.config.page_size))
            .await?;
        Ok(threads
            .iter()
            .map(|thread| preview(thread, &self.config))
            .collect())
    }

    /// Mark a thread as reported.
    ///
    /// Returns false if the thread does not exist.
    pub async fn report_thread(&self, thread_id: &str) -> Result<bool> {
        let Some(id) = parse_id(thread_id) else {
            return Ok(false);
        };
        let reported = self.repo().report(id).await?;
        if reported {
            tracing::info!(thread_id = %id, "Thread reported");
        }
        Ok(reported)
    }

    /// Delete a thread if the password matches.
    pub async fn delete_thread(
        &self,
        thread_id: &str,
        delete_password: &str,
    ) -> Result<DeleteOutcome> {
        let Some(id) = parse_id(thread_id) else {
            return Ok(DeleteOutcome::IncorrectPassword);
        };
        if self.repo().delete_with_password(id, delete_password).await? {
            tracing::info!(thread_id = %id, "Thread deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::IncorrectPassword)
        }
    }

    /// Append a reply to a thread, bumping it.
    ///
    /// Returns a not-found error if the thread does not exist.
    pub async fn create_reply(
        &self,
        thread_id: &str,
        text: &str,
        delete_password: &str,
    ) -> Result<Reply> {
        let id = parse_id(thread_id).ok_or_else(|| BbsError::NotFound("thread".to_string()))?;
        let reply = self
            .repo()
            .add_reply(id, &NewReply::new(text, delete_password))
            .await?
            .ok_or_else(|| BbsError::NotFound("thread".to_string()))?;
        tracing::debug!(thread_id = %id, reply_id = %reply.id, "Reply added");
        Ok(reply)
    }

    /// Get a thread with all of its replies.
    pub async fn get_thread(&self, thread_id: &str) -> Result<ThreadView> {
        let id = parse_id(thread_id).ok_or_else(|| BbsError::NotFound("thread".to_string()))?;
        let thread = self
            .repo()
            .get_by_id(id)
            .await?
            .ok_or_else(|| BbsError::NotFound("thread".to_string()))?;
        Ok(ThreadView::from(&thread))
    }

    /// Redact a reply if the password matches.
    ///
    /// The reply stays in the thread; only its text is replaced.
    pub async fn redact_reply(
        &self,
        thread_id: &str,
        reply_id: &str,
        delete_password: &str,
    ) -> Result<DeleteOutcome> {
        let (Some(thread_id), Some(reply_id)) = (parse_id(thread_id), parse_id(reply_id)) else {
            return Ok(DeleteOutcome::IncorrectPassword);
        };
        let redacted = self
            .repo()
            .redact_reply(
                thread_id,
                reply_id,
                delete_password,
                &self.config.redaction_text,
            )
            .await?;
        if redacted {
            tracing::info!(thread_id = %thread_id, reply_id = %reply_id, "Reply redacted");
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::IncorrectPassword)
        }
    }

    /// Mark a reply as reported.
    ///
    /// Returns a not-found error if the thread/reply pair does not exist.
    pub async fn report_reply(&self, thread_id: &str, reply_id: &str) -> Result<()> {
        let not_found = || BbsError::NotFound("reply".to_string());
        let thread_id = parse_id(thread_id).ok_or_else(not_found)?;
        let reply_id = parse_id(reply_id).ok_or_else(not_found)?;
        if !self.repo().report_reply(thread_id, reply_id).await? {
            return Err(not_found());
        }
        tracing::info!(thread_id = %thread_id, reply_id = %reply_id, "Reply reported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_service(config: BoardConfig) -> BoardService {
        let db = Database::open_in_memory().await.unwrap();
        BoardService::new(db, config)
    }

    async fn add_replies(service: &BoardService, thread_id: Uuid, n: usize) -> Vec<Reply> {
        let mut replies = Vec::new();
        for i in 0..n {
            let reply = service
                .create_reply(&thread_id.to_string(), &format!("reply {i}"), "rpw")
                .await
                .unwrap();
            replies.push(reply);
            // Keep created_on strictly increasing.
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        replies
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()), Some(id));
        assert_eq!(parse_id(&format!(" {id} ")), Some(id));
        assert_eq!(parse_id("not-an-id"), None);
        assert_eq!(parse_id(""), None);
    }

    #[tokio::test]
    async fn test_new_thread_lists_with_no_replies() {
        let service = setup_service(BoardConfig::default()).await;
        service.create_thread("test", "hello", "pw").await.unwrap();

        let threads = service.list_threads("test").await.unwrap();
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].text, "hello");
        assert!(threads[0].replies.is_empty());
        assert_eq!(threads[0].replycount, 0);
    }

    #[tokio::test]
    async fn test_list_threads_page_size() {
        let service = setup_service(BoardConfig::default()).await;
        for i in 0..12 {
            service
                .create_thread("busy", &format!("t{i}"), "pw")
                .await
                .unwrap();
        }

        let threads = service.list_threads("busy").await.unwrap();
        assert_eq!(threads.len(), 10);
        assert!(threads
            .windows(2)
            .all(|w| w[0].bumped_on >= w[1].bumped_on));
    }

    #[tokio::test]
    async fn test_preview_keeps_oldest_three_newest_first() {
        let service = setup_service(BoardConfig::default()).await;
        let thread = service.create_thread("test", "op", "pw").await.unwrap();
        let replies = add_replies(&service, thread.id, 5).await;

        let threads = service.list_threads("test").await.unwrap();
        let listed: Vec<Uuid> = threads[0].replies.iter().map(|r| r.id).collect();

        // Newest-first order is r4 r3 r2 r1 r0; the last three are r2 r1 r0.
        assert_eq!(listed, vec![replies[2].id, replies[1].id, replies[0].id]);
        assert_eq!(threads[0].replycount, 3);
    }

    #[tokio::test]
    async fn test_preview_total_reply_count() {
        let config = BoardConfig {
            reply_count: ReplyCountMode::Total,
            ..Default::default()
        };
        let service = setup_service(config).await;
        let thread = service.create_thread("test", "op", "pw").await.unwrap();
        add_replies(&service, thread.id, 5).await;

        let threads = service.list_threads("test").await.unwrap();
        assert_eq!(threads[0].replies.len(), 3);
        assert_eq!(threads[0].replycount, 5);
    }

    #[tokio::test]
    async fn test_preview_short_thread() {
        let service = setup_service(BoardConfig::default()).await;
        let thread = service.create_thread("test", "op", "pw").await.unwrap();
        let replies = add_replies(&service, thread.id, 2).await;

        let threads = service.list_threads("test").await.unwrap();
        let listed: Vec<Uuid> = threads[0].replies.iter().map(|r| r.id).collect();
        assert_eq!(listed, vec![replies[1].id, replies[0].id]);
        assert_eq!(threads[0].replycount, 2);
    }

    #[tokio::test]
    async fn test_get_thread_returns_all_replies_in_order() {
        let service = setup_service(BoardConfig::default()).await;
        let thread = service.create_thread("test", "op", "pw").await.unwrap();
        let replies = add_replies(&service, thread.id, 6).await;

        let view = service.get_thread(&thread.id.to_string()).await.unwrap();
        let ids: Vec<Uuid> = view.replies.iter().map(|r| r.id).collect();
        let expected: Vec<Uuid> = replies.iter().map(|r| r.id).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_get_thread_not_found() {
        let service = setup_service(BoardConfig::default()).await;

        let result = service.get_thread(&Uuid::new_v4().to_string()).await;
        assert!(matches!(result, Err(BbsError::NotFound(_))));

        let result = service.get_thread("garbage").await;
        assert!(matches!(result, Err(BbsError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_reply_bumps_thread() {
        let service = setup_service(BoardConfig::default()).await;
        let thread = service.create_thread("test", "op", "pw").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;

        let reply = service
            .create_reply(&thread.id.to_string(), "hi", "rpw")
            .await
            .unwrap();

        let view = service.get_thread(&thread.id.to_string()).await.unwrap();
        assert!(view.bumped_on > thread.bumped_on);
        assert_eq!(view.bumped_on, reply.created_on);
        assert_eq!(view.created_on, thread.created_on);
    }

    #[tokio::test]
    async fn test_create_reply_missing_thread() {
        let service = setup_service(BoardConfig::default()).await;

        let result = service
            .create_reply(&Uuid::new_v4().to_string(), "hi", "pw")
            .await;
        assert!(matches!(result, Err(BbsError::NotFound(_))));

        let result = service.create_reply("", "hi", "pw").await;
        assert!(matches!(result, Err(BbsError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_thread() {
        let service = setup_service(BoardConfig::default()).await;
        let thread = service.create_thread("test", "op", "pw").await.unwrap();
        let id = thread.id.to_string();

        assert_eq!(
            service.delete_thread(&id, "wrong").await.unwrap(),
            DeleteOutcome::IncorrectPassword
        );
        assert!(service.get_thread(&id).await.is_ok());

        assert_eq!(
            service.delete_thread(&id, "pw").await.unwrap(),
            DeleteOutcome::Deleted
        );
        assert!(matches!(
            service.get_thread(&id).await,
            Err(BbsError::NotFound(_))
        ));
        assert_eq!(
            service.delete_thread(&id, "pw").await.unwrap(),
            DeleteOutcome::IncorrectPassword
        );
        assert!(!service.report_thread(&id).await.unwrap());
        assert!(service.list_threads("test").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_thread_invalid_id() {
        let service = setup_service(BoardConfig::default()).await;
        assert_eq!(
            service.delete_thread("nope", "pw").await.unwrap(),
            DeleteOutcome::IncorrectPassword
        );
    }

    #[tokio::test]
    async fn test_report_thread() {
        let service = setup_service(BoardConfig::default()).await;
        let thread = service.create_thread("test", "op", "pw").await.unwrap();

        assert!(service.report_thread(&thread.id.to_string()).await.unwrap());
        assert!(!service
            .report_thread(&Uuid::new_v4().to_string())
            .await
            .unwrap());
        assert!(!service.report_thread("nope").await.unwrap());
    }

    #[tokio::test]
    async fn test_redact_reply() {
        let service = setup_service(BoardConfig::default()).await;
        let thread = service.create_thread("test", "op", "pw").await.unwrap();
        let replies = add_replies(&service, thread.id, 3).await;
        let thread_id = thread.id.to_string();
        let target = replies[1].id.to_string();

        assert_eq!(
            service
                .redact_reply(&thread_id, &target, "wrong")
                .await
                .unwrap(),
            DeleteOutcome::IncorrectPassword
        );
        assert_eq!(
            service
                .redact_reply(&thread_id, &target, "rpw")
                .await
                .unwrap(),
            DeleteOutcome::Deleted
        );

        let view = service.get_thread(&thread_id).await.unwrap();
        assert_eq!(view.replies.len(), 3);
        assert_eq!(view.replies[0].text, "reply 0");
        assert_eq!(view.replies[1].text, "[deleted]");
        assert_eq!(view.replies[1].created_on, replies[1].created_on);
        assert_eq!(view.replies[2].text, "reply 2");
    }

    #[tokio::test]
    async fn test_redact_reply_custom_text() {
        let config = BoardConfig {
            redaction_text: "[removed]".to_string(),
            ..Default::default()
        };
        let service = setup_service(config).await;
        let thread = service.create_thread("test", "op", "pw").await.unwrap();
        let reply = service
            .create_reply(&thread.id.to_string(), "hi", "rpw")
            .await
            .unwrap();

        service
            .redact_reply(&thread.id.to_string(), &reply.id.to_string(), "rpw")
            .await
            .unwrap();

        let view = service.get_thread(&thread.id.to_string()).await.unwrap();
        assert_eq!(view.replies[0].text, "[removed]");
    }

    #[tokio::test]
    async fn test_redact_reply_invalid_ids() {
        let service = setup_service(BoardConfig::default()).await;
        assert_eq!(
            service.redact_reply("a", "b", "pw").await.unwrap(),
            DeleteOutcome::IncorrectPassword
        );
    }

    #[tokio::test]
    async fn test_report_reply() {
        let service = setup_service(BoardConfig::default()).await;
        let thread = service.create_thread("test", "op", "pw").await.unwrap();
        let reply = service
            .create_reply(&thread.id.to_string(), "hi", "rpw")
            .await
            .unwrap();

        service
            .report_reply(&thread.id.to_string(), &reply.id.to_string())
            .await
            .unwrap();

        let result = service
            .report_reply(&thread.id.to_string(), &Uuid::new_v4().to_string())
            .await;
        assert!(matches!(result, Err(BbsError::NotFound(_))));

        let result = service.report_reply("x", "y").await;
        assert!(matches!(result, Err(BbsError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_boards_are_isolated() {
        let service = setup_service(BoardConfig::default()).await;
        service.create_thread("a", "in a", "pw").await.unwrap();
        service.create_thread("b", "in b", "pw").await.unwrap();

        let a = service.list_threads("a").await.unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].board, "a");
    }
}
