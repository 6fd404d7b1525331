//! # Task Checker
//!
//! Checks web-development task submissions hosted on GitHub.
//!
//! This library provides:
//! - An HTTP API (`POST /submit`) that verifies one submission per request
//! - A raw-content client reading `index.html` / `style.css` from a repository
//! - A Gemini-backed LLM client producing a one-line verdict
//! - A terminal submission client for the fixed task list
//!
//! ## Submission Flow
//!
//! ```text
//!   task-client ──POST /submit──▶ Verifier
//!                                   │
//!                                   ├─▶ raw.githubusercontent.com  (index.html, style.css)
//!                                   └─▶ Gemini generateContent     (verdict)
//! ```
//!
//! ## Modules
//! - `api`: axum routes and wire types
//! - `task`: task catalog, rubrics and the verification pipeline
//! - `github`: repository link parsing and raw-content retrieval
//! - `llm`: LLM client trait and the Gemini implementation
//! - `client`: submission board and `/submit` client

pub mod api;
pub mod client;
pub mod config;
pub mod github;
pub mod llm;
pub mod task;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use task::{Verifier, VerificationRequest, VerificationResult};
