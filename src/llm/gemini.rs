//! Google Gemini (Generative Language API) client implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::LlmError;
use super::{ChatResponse, LlmClient, TokenUsage};

/// Default base URL of the Generative Language API.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Gemini `generateContent` client. Each call is a single attempt.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client against `base_url` with a per-request timeout.
    pub fn new(
        api_key: String,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(model)
        )
    }

    /// Execute a single request.
    async fn execute_request(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<ChatResponse, LlmError> {
        let response = match self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                if e.is_timeout() {
                    return Err(LlmError::network_error(format!("Request timeout: {}", e)));
                } else if e.is_connect() {
                    return Err(LlmError::network_error(format!("Connection failed: {}", e)));
                } else {
                    return Err(LlmError::network_error(format!("Request failed: {}", e)));
                }
            }
        };

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            LlmError::network_error(format!("Failed to read response body: {}", e))
        })?;

        if !status.is_success() {
            return Err(LlmError::from_status(status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::parse_error(format!("Failed to parse response: {}, body: {}", e, body))
        })?;

        let candidate = match parsed.candidates.into_iter().next() {
            Some(c) => c,
            None => {
                let reason = parsed
                    .prompt_feedback
                    .and_then(|f| f.block_reason)
                    .unwrap_or_else(|| "unknown".to_string());
                return Err(LlmError::parse_error(format!(
                    "No candidates in response (block reason: {})",
                    reason
                )));
            }
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        Ok(ChatResponse {
            content: if text.is_empty() { None } else { Some(text) },
            finish_reason: candidate.finish_reason,
            usage: parsed.usage_metadata.map(|u| {
                TokenUsage::new(u.prompt_token_count, u.candidates_token_count)
            }),
            model: parsed.model_version.or_else(|| Some(model.to_string())),
        })
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn chat_completion(&self, model: &str, prompt: &str) -> Result<ChatResponse, LlmError> {
        let request = GenerateContentRequest::from_prompt(prompt);

        tracing::debug!("Sending request to Gemini: model={}", model);

        self.execute_request(model, &request).await
    }
}

/// `generateContent` request body.
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

/// `generateContent` response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}
