//! Error types and validation helpers for `ai-llm-service`.
//!
//! This module defines the crate-wide error hierarchy (config, provider,
//! health) plus small, reusable helpers for reading/validating environment
//! variables. All error messages include the suffix `[AI LLM Service]` so
//! that logs and bubbled-up errors can be easily attributed to this library.

use reqwest::StatusCode;
use thiserror::Error;

pub use crate::config::llm_provider::LlmProvider as Provider;

/// Top-level error type returned by every public operation in this crate.
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/env-loading failure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Provider (OpenAI/Anthropic/Ollama) request failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Transport-level failure before a provider-specific error could be built.
    #[error("[AI LLM Service] http transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/// Error enum for environment/config-driven setup.
///
/// Keep this focused: only errors that realistically happen at config
/// load/validation time. Extend conservatively as needs arise.
///
/// All variants include `[AI LLM Service]` in their messages.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like ports, limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`, `OLLAMA_PORT`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Unsupported provider in `LLM_PROVIDER`/`LLM_KIND`.
    #[error("[AI LLM Service] unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `OLLAMA_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[AI LLM Service] {field} is out of range: {detail}")]
    OutOfRange {
        /// Field name (e.g., `temperature`).
        field: &'static str,
        /// Description of the expected range (e.g., `expected 0.0..=1.0`).
        detail: &'static str,
    },

    /// Model name was empty or invalid.
    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,

    /// Stop sequences contained one or more empty strings.
    #[error("[AI LLM Service] stop sequences must not contain empty strings")]
    InvalidStopSequence,

    /// No backend could be auto-detected from the environment (no credentials present).
    #[error(
        "[AI LLM Service] no LLM backend configured: set LLM_PROVIDER or one of OPENAI_API_KEY/ANTHROPIC_API_KEY/OLLAMA_BASE_URL"
    )]
    NoBackendDetected,
}

/// A short snippet of an HTTP response body, for error messages/logs.
pub fn make_snippet(text: &str) -> String {
    text.chars().take(240).collect()
}

/// Transport/HTTP-shape details attached to a non-2xx provider response.
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub url: String,
    pub snippet: String,
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "status {} from {}: {}",
            self.status, self.url, self.snippet
        )
    }
}

/// Provider-level error kinds, shared across OpenAI/Anthropic/Ollama clients.
#[derive(Debug, Error)]
pub enum ProviderErrorKind {
    #[error("invalid provider for this client")]
    InvalidProvider,

    #[error("missing API key")]
    MissingApiKey,

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("response contained no choices/content")]
    EmptyChoices,

    #[error("non-success response: {0}")]
    HttpStatus(HttpError),

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),
}

/// A single provider call failure, tagged with which provider produced it.
#[derive(Debug, Error)]
#[error("[AI LLM Service] {provider:?} error: {kind}")]
pub struct ProviderError {
    pub provider: Provider,
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(provider: Provider, kind: ProviderErrorKind) -> Self {
        Self { provider, kind }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        // Only used where the provider is unambiguous from call context;
        // callers that need attribution should map errors explicitly.
        let kind = if e.is_timeout() {
            ProviderErrorKind::Timeout
        } else {
            ProviderErrorKind::Network(e.to_string())
        };
        ProviderError {
            provider: Provider::Ollama,
            kind,
        }
    }
}

impl From<crate::services::ollama_service::OllamaError> for ProviderError {
    fn from(e: crate::services::ollama_service::OllamaError) -> Self {
        use crate::services::ollama_service::OllamaError as E;
        let kind = match e {
            E::InvalidProvider => ProviderErrorKind::InvalidProvider,
            E::InvalidEndpoint(msg) => ProviderErrorKind::InvalidEndpoint(msg),
            E::Transport(err) => return ProviderError::from(err),
            E::HttpStatus { status, url, snippet } => {
                ProviderErrorKind::HttpStatus(HttpError { status, url, snippet })
            }
            E::Decode(msg) => ProviderErrorKind::Decode(msg),
        };
        ProviderError::new(Provider::Ollama, kind)
    }
}

impl From<crate::services::ollama_service::OllamaError> for AiLlmError {
    fn from(e: crate::services::ollama_service::OllamaError) -> Self {
        AiLlmError::Provider(ProviderError::from(e))
    }
}

/* ------------------------ Env helpers ------------------------ */

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] if the variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Fetches an optional, non-empty environment variable.
pub fn opt_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u32`.
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => {
            v.parse::<u32>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidNumber {
                    var: name,
                    reason: "expected u32",
                })
        }
        _ => Ok(None),
    }
}

/* --------------------- Validation helpers --------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start
/// with a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        })
    }
}

/// Validates that a floating-point value lies within an inclusive range.
///
/// Useful for parameters like `temperature` (e.g., `0.0..=2.0`) or
/// `top_p` (`0.0..=1.0`).
///
/// # Errors
/// Returns [`ConfigError::OutOfRange`] if `value` is outside `[min, max]`.
pub fn validate_range_f32(
    field: &'static str,
    value: f32,
    min: f32,
    max: f32,
) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            detail: "expected value in inclusive range",
        })
    }
}

/// Ensures that a list of stop sequences contains no empty strings.
///
/// # Errors
/// Returns [`ConfigError::InvalidStopSequence`] if any element is an empty string.
pub fn validate_stop_sequences<S>(stops: &[S]) -> Result<(), ConfigError>
where
    S: AsRef<str>,
{
    if stops.iter().any(|s| s.as_ref().is_empty()) {
        Err(ConfigError::InvalidStopSequence)
    } else {
        Ok(())
    }
}
