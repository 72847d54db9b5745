//! Database schema and migrations for anonbbs.
//!
//! Migrations are applied in order when the database is opened. The
//! `schema_version` table records which ones have already run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: threads with their embedded replies
    r#"
CREATE TABLE threads (
    id              TEXT PRIMARY KEY,
    board           TEXT NOT NULL,
    text            TEXT NOT NULL,
    created_on      TEXT NOT NULL,
    bumped_on       TEXT NOT NULL,
    reported        INTEGER NOT NULL DEFAULT 0,
    delete_password TEXT NOT NULL
);

CREATE INDEX idx_threads_board_bumped ON threads(board, bumped_on DESC);

CREATE TABLE replies (
    id              TEXT PRIMARY KEY,
    thread_id       TEXT NOT NULL REFERENCES threads(id) ON DELETE CASCADE,
    seq             INTEGER NOT NULL,
    text            TEXT NOT NULL,
    created_on      TEXT NOT NULL,
    reported        INTEGER NOT NULL DEFAULT 0,
    delete_password TEXT NOT NULL,
    UNIQUE (thread_id, seq)
);

CREATE INDEX idx_replies_thread ON replies(thread_id, seq);
"#,
];
