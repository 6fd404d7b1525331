//! HTTP API for the task checker.
//!
//! ## Endpoints
//!
//! - `POST /submit` - Verify a task submission
//! - `GET /api/health` - Health check

mod routes;
pub mod types;

pub use routes::{router, serve, AppState};
pub use types::*;
