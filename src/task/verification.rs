//! Submission verification: fetch the submitted site and ask a model for a verdict.
//!
//! The pipeline is strictly linear:
//! 1. Require a task number and a link
//! 2. Parse `owner/repo` from the link
//! 3. Fetch `index.html` (mandatory)
//! 4. Fetch `style.css` (optional, placeholder when absent)
//! 5. Ask the model; any failure becomes [`AI_FALLBACK_FEEDBACK`]
//!
//! Only steps 1-3 can reject a submission.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::catalog::rubric_for;
use crate::github::{parse_repo_url, FetchedFile, RawContentFetcher};
use crate::llm::LlmClient;

pub const INDEX_HTML: &str = "index.html";
pub const STYLE_CSS: &str = "style.css";

pub const SUCCESS_MESSAGE: &str = "Submission received successfully!";
pub const STYLE_CSS_PLACEHOLDER: &str = "⚠️ No style.css found in the repository.";
pub const AI_FALLBACK_FEEDBACK: &str = "AI analysis could not be completed due to an error.";

/// A submission as received from the client.
///
/// All fields are optional on the wire so that missing ones can be reported
/// with a proper message instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    #[serde(default)]
    pub task_number: Option<u32>,
    /// Display name of the task; informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    #[serde(default)]
    pub submission_link: Option<String>,
}

/// File bodies returned alongside the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedFiles {
    pub index_html: String,
    pub style_css: String,
}

/// Successful verification envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub message: String,
    pub task_number: u32,
    pub submission_link: String,
    pub files: SubmittedFiles,
    pub ai_feedback: String,
}

/// Reasons a submission is rejected before a verdict is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("All fields are required!")]
    MissingFields,

    #[error("Invalid GitHub repository URL.")]
    InvalidRepositoryUrl,

    #[error("index.html is required but was not found in the repository.")]
    MissingIndexHtml,
}

/// Classification of model feedback text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Error(String),
    /// The model ignored the requested format
    Unrecognized,
}

impl Verdict {
    /// Classify trimmed feedback, tolerating markdown bold and quotes around it.
    pub fn classify(feedback: &str) -> Self {
        let text = feedback.trim().trim_matches(|c| c == '*' || c == '"').trim();

        if text.eq_ignore_ascii_case("correct") {
            return Verdict::Correct;
        }

        match text.strip_prefix("Error:") {
            Some(reason) => Verdict::Error(
                reason
                    .trim()
                    .trim_matches(|c| c == '*' || c == '"')
                    .trim()
                    .to_string(),
            ),
            None => Verdict::Unrecognized,
        }
    }
}

/// Build the grading prompt for a task and the fetched files.
pub fn build_prompt(task_number: u32, index_html: &str, style_css: Option<&str>) -> String {
    format!(
        r#"Task {task_number}: {rubric}

Here is the submitted index.html:
{index_html}

Here is the submitted style.css:
{style_css}

Your response must be in one of these two formats only:
- If the code correctly fulfills the task: **"Correct"**
- If the code has issues: **"Error: [reason]"** (reason should be short and clear)

Do not provide explanations, do not format as paragraphs. Only return "Correct" or "Error: [reason]"."#,
        rubric = rubric_for(task_number),
        style_css = style_css.unwrap_or("No CSS file was provided."),
    )
}

/// Runs the verification pipeline against injected collaborators.
pub struct Verifier {
    fetcher: Arc<dyn RawContentFetcher>,
    llm: Arc<dyn LlmClient>,
    model: String,
}

impl Verifier {
    pub fn new(
        fetcher: Arc<dyn RawContentFetcher>,
        llm: Arc<dyn LlmClient>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            llm,
            model: model.into(),
        }
    }

    /// Model used for verdicts.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Verify one submission.
    ///
    /// # Errors
    /// Only input problems and a missing `index.html` are errors; upstream
    /// AI failures degrade to [`AI_FALLBACK_FEEDBACK`].
    pub async fn verify(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationResult, VerificationError> {
        let task_number = request.task_number.filter(|n| *n > 0);
        let submission_link = request
            .submission_link
            .filter(|link| !link.trim().is_empty());

        let (task_number, submission_link) = match (task_number, submission_link) {
            (Some(n), Some(link)) => (n, link),
            _ => return Err(VerificationError::MissingFields),
        };

        tracing::info!(
            "Received submission: task={} ({}) link={}",
            task_number,
            request.task_name.as_deref().unwrap_or("unnamed"),
            submission_link
        );

        let repo = parse_repo_url(&submission_link).ok_or_else(|| {
            tracing::info!("Rejected submission link: {}", submission_link);
            VerificationError::InvalidRepositoryUrl
        })?;

        tracing::info!("Fetching files for {}", repo);

        let index_html = match self.fetcher.fetch(&repo, INDEX_HTML).await {
            FetchedFile::Present(content) => content,
            FetchedFile::Absent(reason) => {
                tracing::info!("{} missing from {}: {}", INDEX_HTML, repo, reason);
                return Err(VerificationError::MissingIndexHtml);
            }
        };

        let style_css = self.fetcher.fetch(&repo, STYLE_CSS).await;
        if let FetchedFile::Absent(reason) = &style_css {
            tracing::debug!("{} missing from {}: {}", STYLE_CSS, repo, reason);
        }

        let ai_feedback = self
            .judge(task_number, &index_html, style_css.content())
            .await;

        Ok(VerificationResult {
            message: SUCCESS_MESSAGE.to_string(),
            task_number,
            submission_link,
            files: SubmittedFiles {
                index_html,
                style_css: style_css
                    .into_content()
                    .unwrap_or_else(|| STYLE_CSS_PLACEHOLDER.to_string()),
            },
            ai_feedback,
        })
    }

    /// Ask the model for a verdict. Never fails.
    async fn judge(&self, task_number: u32, index_html: &str, style_css: Option<&str>) -> String {
        let prompt = build_prompt(task_number, index_html, style_css);

        tracing::info!("Sending request to {}", self.model);

        let response = match self.llm.chat_completion(&self.model, &prompt).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("AI analysis failed: {}", e);
                return AI_FALLBACK_FEEDBACK.to_string();
            }
        };

        if let Some(usage) = &response.usage {
            tracing::debug!(
                "AI usage: model={} prompt_tokens={} completion_tokens={} total_tokens={}",
                response.model.as_deref().unwrap_or(&self.model),
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        let feedback = response
            .content
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        match feedback {
            Some(feedback) => {
                tracing::info!(
                    "AI response ({:?}): {}",
                    Verdict::classify(&feedback),
                    feedback
                );
                feedback
            }
            None => {
                tracing::error!(
                    "AI analysis returned no text (finish reason: {})",
                    response.finish_reason.as_deref().unwrap_or("unknown")
                );
                AI_FALLBACK_FEEDBACK.to_string()
            }
        }
    }
}
