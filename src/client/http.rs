//! HTTP client for the `/submit` endpoint.

use reqwest::Client;

use crate::api::ErrorResponse;
use crate::task::{VerificationRequest, VerificationResult};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server rejected submission (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Sends submissions to a task checker server.
pub struct SubmitClient {
    client: Client,
    endpoint: String,
}

impl SubmitClient {
    pub fn new(server_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/submit", server_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one submission and decode the verdict.
    pub async fn submit(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, SubmitError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{closed_port_url, spawn_server};
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    fn request() -> VerificationRequest {
        VerificationRequest {
            task_number: Some(1),
            task_name: Some("Hello World".to_string()),
            submission_link: Some("https://github.com/alice/site".to_string()),
        }
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        assert_eq!(
            SubmitClient::new("http://localhost:8000/").endpoint(),
            "http://localhost:8000/submit"
        );
    }

    #[tokio::test]
    async fn submit_decodes_success() {
        let app = Router::new().route(
            "/submit",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["taskName"], "Hello World");
                Json(json!({
                    "message": "Submission received successfully!",
                    "taskNumber": body["taskNumber"],
                    "submissionLink": body["submissionLink"],
                    "files": { "indexHtml": "<h1>Hello World</h1>", "styleCss": "body {}" },
                    "aiFeedback": "Correct"
                }))
            }),
        );
        let base = spawn_server(app).await;

        let result = SubmitClient::new(&base).submit(&request()).await.unwrap();

        assert_eq!(result.task_number, 1);
        assert_eq!(result.ai_feedback, "Correct");
        assert_eq!(result.files.style_css, "body {}");
    }

    #[tokio::test]
    async fn submit_surfaces_server_message() {
        let app = Router::new().route(
            "/submit",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "Invalid GitHub repository URL." })),
                )
            }),
        );
        let base = spawn_server(app).await;

        let err = SubmitClient::new(&base).submit(&request()).await.unwrap_err();

        match err {
            SubmitError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid GitHub repository URL.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn submit_reports_unreachable_server() {
        let base = closed_port_url().await;
        let err = SubmitClient::new(&base).submit(&request()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
    }
}
