//! HTTP API for anonbbs.
//!
//! Thread routes live under `/api/threads/:board` and reply routes under
//! `/api/replies/:board`. Request bodies may be JSON or urlencoded forms.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::{ApiError, ErrorCode};
pub use handlers::AppState;
pub use router::{create_health_router, create_router};
pub use server::{shutdown_signal, WebServer};
