//! Middleware for the board API.

mod cors;

pub use cors::create_cors_layer;
