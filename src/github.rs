//! GitHub repository links and raw-content retrieval.
//!
//! Files are read unauthenticated from `raw.githubusercontent.com` (or a
//! configured mirror) on a single branch. A fetch never fails outward:
//! every problem is reported as [`FetchedFile::Absent`] with its reason.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;

/// Default raw-content host.
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Default branch submissions are read from.
pub const DEFAULT_BRANCH: &str = "main";

/// Owner and repository name parsed from a submission link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

fn repo_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"github\.com/([^/?#\s]+)/([^/?#\s]+)").unwrap())
}

/// Extract `{owner, repo}` from anything containing `github.com/<owner>/<repo>`.
///
/// Extra path segments (`/tree/main`, `/blob/...`), a query or a fragment are
/// ignored, and a trailing `.git` is dropped from the repository name.
/// Dot segments (`.`, `..`) are rejected as they would change the raw path.
pub fn parse_repo_url(link: &str) -> Option<RepoRef> {
    let caps = repo_url_regex().captures(link)?;
    let owner = caps.get(1)?.as_str();
    let repo = caps.get(2)?.as_str();
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    if repo.is_empty() || is_dot_segment(owner) || is_dot_segment(repo) {
        return None;
    }

    Some(RepoRef {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}

fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment == ".."
}

/// Why a file could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsenceReason {
    /// Upstream answered with a non-success status (404, 429, ...)
    Status(u16),
    /// The file exists but has no content
    Empty,
    /// Connection, timeout or body read failure
    Transport(String),
}

impl fmt::Display for AbsenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbsenceReason::Status(code) => write!(f, "HTTP {}", code),
            AbsenceReason::Empty => write!(f, "empty file"),
            AbsenceReason::Transport(message) => write!(f, "{}", message),
        }
    }
}

/// Outcome of one raw-content fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchedFile {
    Present(String),
    Absent(AbsenceReason),
}

impl FetchedFile {
    pub fn is_present(&self) -> bool {
        matches!(self, FetchedFile::Present(_))
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            FetchedFile::Present(content) => Some(content),
            FetchedFile::Absent(_) => None,
        }
    }

    pub fn into_content(self) -> Option<String> {
        match self {
            FetchedFile::Present(content) => Some(content),
            FetchedFile::Absent(_) => None,
        }
    }
}

/// Source of repository file contents.
#[async_trait]
pub trait RawContentFetcher: Send + Sync {
    /// Read `path` from the repository's configured branch.
    async fn fetch(&self, repo: &RepoRef, path: &str) -> FetchedFile;
}

/// Unauthenticated raw-content client.
pub struct GitHubRawClient {
    client: Client,
    base_url: String,
    branch: String,
}

impl GitHubRawClient {
    pub fn new(
        base_url: impl Into<String>,
        branch: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("task-checker/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            branch: branch.into(),
        })
    }

    /// URL of `path` on the configured branch.
    pub fn raw_url(&self, repo: &RepoRef, path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.base_url,
            urlencoding::encode(&repo.owner),
            urlencoding::encode(&repo.repo),
            self.branch,
            path
        )
    }
}

#[async_trait]
impl RawContentFetcher for GitHubRawClient {
    async fn fetch(&self, repo: &RepoRef, path: &str) -> FetchedFile {
        let url = self.raw_url(repo, path);
        tracing::debug!("Fetching: {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Failed to fetch {} ({})", path, e);
                return FetchedFile::Absent(AbsenceReason::Transport(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Failed to fetch {} (HTTP {})", path, status.as_u16());
            return FetchedFile::Absent(AbsenceReason::Status(status.as_u16()));
        }

        match response.text().await {
            Ok(body) if body.is_empty() => {
                tracing::warn!("Fetched {} but it is empty", path);
                FetchedFile::Absent(AbsenceReason::Empty)
            }
            Ok(body) => FetchedFile::Present(body),
            Err(e) => {
                tracing::warn!("Failed to read {} ({})", path, e);
                FetchedFile::Absent(AbsenceReason::Transport(e.to_string()))
            }
        }
    }
}
