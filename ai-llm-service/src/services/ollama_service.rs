//! Lightweight Ollama service for the per-chunk chat backend.
//!
//! This module implements a thin client for the local Ollama API:
//! - `POST {endpoint}/api/chat` — multi-turn chat completion (`stream=false`)
//!
//! It uses the universal configuration [`LlmModelConfig`] and ensures
//! that the selected provider is [`LlmProvider::Ollama`].

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;

/// Errors produced by [`OllamaService`].
#[derive(Debug, Error)]
pub enum OllamaError {
    /// The provider in the config is not Ollama.
    #[error("[AI LLM Service] invalid provider: expected Ollama, got different provider")]
    InvalidProvider,

    /// Invalid endpoint (empty or missing http/https).
    #[error("[AI LLM Service] invalid Ollama endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport/HTTP client error.
    #[error("[AI LLM Service] transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-successful HTTP status from upstream.
    #[error("[AI LLM Service] unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Optional short snippet of the response body.
        snippet: String,
    },

    /// Unexpected/invalid JSON response.
    #[error("[AI LLM Service] failed to decode response: {0}")]
    Decode(String),
}

/// Result alias for Ollama operations.
pub type Result<T> = std::result::Result<T, OllamaError>;

/// Thin client for Ollama.
///
/// Initialized with a full [`LlmModelConfig`]. Reuses an HTTP client with
/// a configurable timeout. Provides one high-level call:
/// - [`OllamaService::chat`] — one multi-turn chat completion
pub struct OllamaService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
}

impl OllamaService {
    /// Creates a new [`OllamaService`] from the given config.
    ///
    /// # Errors
    /// - [`OllamaError::InvalidProvider`] if `cfg.provider` is not `Ollama`
    /// - [`OllamaError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`OllamaError::Transport`] if HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        if cfg.provider != LlmProvider::Ollama {
            return Err(OllamaError::InvalidProvider);
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(OllamaError::InvalidEndpoint(cfg.endpoint));
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_chat = format!("{}/api/chat", base);

        Ok(Self { client, cfg, url_chat })
    }

    /// Runs one multi-turn chat completion via `/api/chat`, requesting a
    /// JSON-only response (`format: "json"`).
    ///
    /// # Errors
    /// - [`OllamaError::HttpStatus`] for non-2xx responses
    /// - [`OllamaError::Transport`] for client errors
    /// - [`OllamaError::Decode`] if response cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn chat(&self, messages: &[crate::chat::ChatMessage]) -> Result<String> {
        let body = ChatRequest {
            model: &self.cfg.model,
            messages: messages.iter().map(ChatTurn::from).collect(),
            stream: false,
            format: "json",
            options: GenerateOptions {
                temperature: self.cfg.temperature,
                top_p: self.cfg.top_p,
                num_predict: self.cfg.max_tokens,
            },
        };

        debug!("POST {}", self.url_chat);
        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = text.chars().take(240).collect::<String>();
            return Err(OllamaError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: ChatResponse = resp
            .json()
            .await
            .map_err(|e| OllamaError::Decode(format!("serde error: {e}; expected `message.content`")))?;

        Ok(out.message.content)
    }

}

/* ==========================
HTTP payloads & options
========================== */

/// Subset of Ollama `options`.
///
/// Extend this struct as needed (top_k, stop sequences, penalties, etc.).
#[derive(Debug, Default, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Request body for `/api/chat` (non-streaming, JSON-mode).
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatTurn<'a>>,
    stream: bool,
    format: &'a str,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct ChatTurn<'a> {
    role: &'a str,
    content: &'a str,
}

impl<'a> From<&'a crate::chat::ChatMessage> for ChatTurn<'a> {
    fn from(m: &'a crate::chat::ChatMessage) -> Self {
        Self {
            role: m.role.as_str(),
            content: &m.content,
        }
    }
}

/// Response body for `/api/chat`.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}
