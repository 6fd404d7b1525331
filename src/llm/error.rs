//! LLM error types with failure classification.
//!
//! Nothing here is retried; the kind is carried so the caller can log why a
//! verdict fell back.

/// Error from LLM API calls.
#[derive(Debug)]
pub struct LlmError {
    /// The kind of error
    pub kind: LlmErrorKind,
    /// HTTP status code, if applicable
    pub status_code: Option<u16>,
    /// Error message
    pub message: String,
}

impl LlmError {
    /// Create a rate limit / quota error.
    pub fn rate_limited(message: String) -> Self {
        Self {
            kind: LlmErrorKind::RateLimited,
            status_code: Some(429),
            message,
        }
    }

    /// Create a server error.
    pub fn server_error(status_code: u16, message: String) -> Self {
        Self {
            kind: LlmErrorKind::ServerError,
            status_code: Some(status_code),
            message,
        }
    }

    /// Create a client error (bad request, auth, etc.).
    pub fn client_error(status_code: u16, message: String) -> Self {
        Self {
            kind: LlmErrorKind::ClientError,
            status_code: Some(status_code),
            message,
        }
    }

    /// Create a network error.
    pub fn network_error(message: String) -> Self {
        Self {
            kind: LlmErrorKind::NetworkError,
            status_code: None,
            message,
        }
    }

    /// Create a parse error.
    pub fn parse_error(message: String) -> Self {
        Self {
            kind: LlmErrorKind::ParseError,
            status_code: None,
            message,
        }
    }

    /// Build the error matching an unsuccessful HTTP status.
    pub fn from_status(status_code: u16, body: &str) -> Self {
        match classify_http_status(status_code) {
            LlmErrorKind::RateLimited => LlmError::rate_limited(body.to_string()),
            LlmErrorKind::ClientError => LlmError::client_error(status_code, body.to_string()),
            _ => LlmError::server_error(status_code, body.to_string()),
        }
    }
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "{} (HTTP {}): {}", self.kind, code, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for LlmError {}

/// Classification of LLM errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Rate limited or quota exhausted (429)
    RateLimited,
    /// Server error (500, 502, 503, 504)
    ServerError,
    /// Client error (400, 401, 403, 404), usually a bad key or model name
    ClientError,
    /// Network error (connection failed, timeout)
    NetworkError,
    /// Response parsing error, including responses without any candidate
    ParseError,
}

impl std::fmt::Display for LlmErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmErrorKind::RateLimited => write!(f, "Rate limited"),
            LlmErrorKind::ServerError => write!(f, "Server error"),
            LlmErrorKind::ClientError => write!(f, "Client error"),
            LlmErrorKind::NetworkError => write!(f, "Network error"),
            LlmErrorKind::ParseError => write!(f, "Parse error"),
        }
    }
}

/// Parse HTTP status code into error kind.
pub fn classify_http_status(status: u16) -> LlmErrorKind {
    match status {
        429 => LlmErrorKind::RateLimited,
        500 | 502 | 503 | 504 => LlmErrorKind::ServerError,
        400..=499 => LlmErrorKind::ClientError,
        _ => LlmErrorKind::ServerError,
    }
}
