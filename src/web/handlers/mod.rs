//! API handlers for the board.

use axum::{
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
};

use crate::board::BoardService;

pub mod replies;
pub mod threads;

pub use replies::*;
pub use threads::*;

/// Body returned when a report is accepted.
pub const REPORTED: &str = "reported";
/// Body returned when a password-checked delete succeeds.
pub const SUCCESS: &str = "success";
/// Body returned when a password-checked delete matches nothing.
pub const INCORRECT_PASSWORD: &str = "incorrect password";

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Board service.
    pub board: BoardService,
}

impl AppState {
    /// Create a new application state.
    pub fn new(board: BoardService) -> Self {
        Self { board }
    }
}

/// 302 redirect to a board page.
fn redirect_to_board(board: &str, rest: &str) -> Response {
    let location = format!("/b/{}/{}", urlencoding::encode(board), rest);
    (StatusCode::FOUND, [(LOCATION, location)]).into_response()
}
