//! Board module for anonbbs.
//!
//! This module provides the message board itself:
//! - Threads scoped to a board name, each owning an ordered list of replies
//! - Persistence of threads and replies with atomic conditional updates
//! - Public projections that never expose delete passwords or report flags
//! - The service implementing listing, detail, deletion, redaction and reporting

mod reply;
mod service;
mod thread;
mod thread_repository;
mod view;

pub use reply::{NewReply, Reply};
pub use service::{BoardService, DeleteOutcome};
pub use thread::{NewThread, Thread};
pub use thread_repository::ThreadRepository;
pub use view::{ReplyView, ThreadPreview, ThreadView};
