//! HTTP layer
//!
//! Axum server with:
//! - JSON error responses
//! - Lenient extractors for query strings and search bodies
//! - Request tracing, timeout and CORS layers

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
