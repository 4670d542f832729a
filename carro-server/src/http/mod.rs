//! HTTP server layer
//!
//! Axum server with:
//! - CORS (own origin plus configured extras)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod server;
pub mod error;
pub mod extractors;
pub mod routes;

pub use server::{build_router, run_server, serve_until, AppState, ServerConfig, ServerError};
pub use error::ApiError;
