//! LLM client module for judging submissions.
//!
//! This module provides a trait-based abstraction over text-generation
//! providers, with Google Gemini as the implementation the server wires in.
//! The client is always an explicit object handed to its consumer so tests
//! can substitute a stub.

mod error;
mod gemini;

pub use error::{classify_http_status, LlmError, LlmErrorKind};
pub use gemini::{GeminiClient, DEFAULT_GEMINI_API_BASE};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Response from a chat completion.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub content: Option<String>,
    pub finish_reason: Option<String>,
    pub usage: Option<TokenUsage>,
    pub model: Option<String>,
}

/// Token usage information (if provided by the upstream provider).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl TokenUsage {
    /// Create a usage object ensuring `total_tokens` is consistent.
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

/// Trait for LLM clients.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single user prompt to `model` and return its reply.
    async fn chat_completion(&self, model: &str, prompt: &str) -> Result<ChatResponse, LlmError>;
}
