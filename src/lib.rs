//! anonbbs - anonymous message board backend
//!
//! Boards hold threads, threads hold replies. Everything is served as a
//! JSON HTTP API backed by SQLite; deletion is guarded by per-post
//! passwords instead of accounts.

pub mod board;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use board::{BoardService, DeleteOutcome, Reply, Thread, ThreadPreview, ThreadView};
pub use config::Config;
pub use db::Database;
pub use error::{BbsError, Result};
pub use web::WebServer;
