//! Router configuration for the board API.

use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::services::ServeFile;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::WebConfig;

use super::handlers::{
    create_reply, create_thread, delete_reply, delete_thread, get_thread, list_threads,
    report_reply, report_thread, AppState,
};
use super::middleware::create_cors_layer;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, config: &WebConfig) -> Router {
    let api_routes = Router::new()
        .route(
            "/threads/:board",
            get(list_threads)
                .post(create_thread)
                .put(report_thread)
                .delete(delete_thread),
        )
        .route(
            "/replies/:board",
            get(get_thread)
                .post(create_reply)
                .put(report_reply)
                .delete(delete_reply),
        );

    let router = Router::new()
        .nest("/api", api_routes)
        .merge(create_page_router(&config.static_path))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&config.cors_origins)),
        )
        .with_state(app_state);

    if config.request_timeout_secs > 0 {
        router.layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
    } else {
        router
    }
}

/// Create the router for the board and thread pages that API redirects point at.
///
/// Both pages are static HTML that load their data from the API.
pub fn create_page_router(static_path: &str) -> Router<Arc<AppState>> {
    let dir = Path::new(static_path);
    Router::new()
        .route_service("/b/:board/", ServeFile::new(dir.join("board.html")))
        .route_service("/b/:board/:thread_id", ServeFile::new(dir.join("thread.html")))
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
