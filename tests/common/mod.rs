//! Test helpers for the HTTP API tests.

#![allow(dead_code)]

use std::sync::Arc;

use anonbbs::board::BoardService;
use anonbbs::config::{BoardConfig, WebConfig};
use anonbbs::web::handlers::AppState;
use anonbbs::web::router::create_router;
use anonbbs::Database;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

/// Create a test configuration.
pub fn create_test_config() -> WebConfig {
    WebConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![],
        request_timeout_secs: 30,
        static_path: "public".to_string(),
    }
}

/// Create a test server with an in-memory database and default board settings.
pub async fn create_test_server() -> TestServer {
    create_test_server_with(BoardConfig::default()).await
}

/// Create a test server with an in-memory database and the given board settings.
pub async fn create_test_server_with(board: BoardConfig) -> TestServer {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let app_state = Arc::new(AppState::new(BoardService::new(db, board)));
    let router = create_router(app_state, &create_test_config());
    TestServer::new(router).expect("Failed to create test server")
}

/// Create a thread and return its `_id` as listed on the board.
pub async fn create_thread(server: &TestServer, board: &str, text: &str, password: &str) -> String {
    server
        .post(&format!("/api/threads/{board}"))
        .json(&json!({ "text": text, "delete_password": password }))
        .await
        .assert_status(StatusCode::FOUND);

    let list: Value = server.get(&format!("/api/threads/{board}")).await.json();
    list.as_array()
        .expect("thread list")
        .iter()
        .find(|t| t["text"] == text)
        .and_then(|t| t["_id"].as_str())
        .expect("created thread is listed")
        .to_string()
}

/// Post a reply to a thread.
pub async fn create_reply(
    server: &TestServer,
    board: &str,
    thread_id: &str,
    text: &str,
    password: &str,
) {
    server
        .post(&format!("/api/replies/{board}"))
        .json(&json!({ "thread_id": thread_id, "text": text, "delete_password": password }))
        .await
        .assert_status(StatusCode::FOUND);
}

/// Fetch a thread with all of its replies.
pub async fn get_thread(server: &TestServer, board: &str, thread_id: &str) -> Value {
    server
        .get(&format!("/api/replies/{board}"))
        .add_query_param("thread_id", thread_id)
        .await
        .json()
}
