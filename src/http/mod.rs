//! HTTP server module
//!
//! - Axum router with the conversion API endpoints
//! - Request handlers and JSON error responses
//! - CORS and request tracing middleware

pub mod handlers;
pub mod routes;

pub use routes::create_router;
