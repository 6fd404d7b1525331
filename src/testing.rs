//! Test helpers: local HTTP servers and stub collaborators.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;

use crate::github::{AbsenceReason, FetchedFile, RawContentFetcher, RepoRef};
use crate::llm::{ChatResponse, LlmClient, LlmError, TokenUsage};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a local port nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Fetcher serving files from memory; unknown paths come back as 404.
#[derive(Default)]
pub struct StubFetcher {
    files: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    /// Paths requested so far, as `owner/repo/path`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RawContentFetcher for StubFetcher {
    async fn fetch(&self, repo: &RepoRef, path: &str) -> FetchedFile {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}/{}", repo, path));
        match self.files.get(path) {
            Some(content) => FetchedFile::Present(content.clone()),
            None => FetchedFile::Absent(AbsenceReason::Status(404)),
        }
    }
}

/// LLM answering every prompt with a fixed reply or failure.
pub struct StubLlm {
    reply: Result<String, u16>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubLlm {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Fail every call with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for StubLlm {
    async fn chat_completion(&self, model: &str, prompt: &str) -> Result<ChatResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(ChatResponse {
                content: Some(text.clone()),
                finish_reason: Some("STOP".to_string()),
                usage: Some(TokenUsage::new(prompt.len() as u64, 1)),
                model: Some(model.to_string()),
            }),
            Err(status) => Err(LlmError::from_status(*status, "stubbed failure")),
        }
    }
}
