//! Configuration management for the task checker server.
//!
//! Configuration can be set via environment variables (a `.env` file is
//! loaded by the binary first):
//! - `GEMINI_API_KEY` - Required. API key for the Generative Language API.
//! - `GEMINI_MODEL` - Optional. Model used for verdicts. Defaults to `gemini-pro`.
//! - `GEMINI_API_BASE` - Optional. API base URL. Defaults to `https://generativelanguage.googleapis.com`.
//! - `GITHUB_RAW_BASE` - Optional. Raw-content base URL. Defaults to `https://raw.githubusercontent.com`.
//! - `GITHUB_BRANCH` - Optional. Branch submissions are read from. Defaults to `main`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `8000`.
//! - `HTTP_TIMEOUT_SECS` - Optional. Timeout for each outbound request. Defaults to `30`.

use std::time::Duration;
use thiserror::Error;

use crate::github::{DEFAULT_BRANCH, DEFAULT_RAW_BASE};
use crate::llm::DEFAULT_GEMINI_API_BASE;

pub const DEFAULT_MODEL: &str = "gemini-pro";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key
    pub api_key: String,

    /// Model identifier used for verdicts
    pub model: String,

    /// Generative Language API base URL
    pub gemini_api_base: String,

    /// Raw-content base URL
    pub github_raw_base: String,

    /// Branch read from every submitted repository
    pub github_branch: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Timeout applied to each outbound request
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `GEMINI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let port = var("PORT", "8000")
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let timeout_secs: u64 = var("HTTP_TIMEOUT_SECS", "30").parse().map_err(|e| {
            ConfigError::InvalidValue("HTTP_TIMEOUT_SECS".to_string(), format!("{}", e))
        })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "HTTP_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            model: var("GEMINI_MODEL", DEFAULT_MODEL),
            gemini_api_base: var("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
            github_raw_base: var("GITHUB_RAW_BASE", DEFAULT_RAW_BASE),
            github_branch: var("GITHUB_BRANCH", DEFAULT_BRANCH),
            host: var("HOST", "127.0.0.1"),
            port,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = load(&[("GEMINI_API_KEY", "secret")]).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.github_raw_base, "https://raw.githubusercontent.com");
        assert_eq!(config.github_branch, "main");
        assert_eq!(config.port, 8000);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_or_blank_key_is_an_error() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingEnvVar(_))));
        assert!(matches!(
            load(&[("GEMINI_API_KEY", "  ")]),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-1.5-flash"),
            ("PORT", "9100"),
            ("HTTP_TIMEOUT_SECS", "5"),
            ("GITHUB_BRANCH", "master"),
        ])
        .unwrap();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.port, 9100);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.github_branch, "master");
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert!(matches!(
            load(&[("GEMINI_API_KEY", "k"), ("PORT", "eighty")]),
            Err(ConfigError::InvalidValue(name, _)) if name == "PORT"
        ));
        assert!(matches!(
            load(&[("GEMINI_API_KEY", "k"), ("HTTP_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidValue(name, _)) if name == "HTTP_TIMEOUT_SECS"
        ));
    }
}
