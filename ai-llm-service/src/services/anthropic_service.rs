//! Anthropic (Messages API) service for the per-chunk chat backend.
//!
//! Minimal, synchronous (non-streaming) client around Anthropic's REST API:
//! - POST {endpoint}/v1/messages — multi-turn chat completion
//!
//! Anthropic has no native JSON-response-format switch (unlike OpenAI's
//! `response_format` or Ollama's `format: "json"`); JSON-only output is
//! requested through the system prompt instead, matching spec.md's note
//! that Anthropic "is handled via system-prompt instruction only".
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::Anthropic`
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Errors are normalized via the unified error types in `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, HttpError, Provider, ProviderError, ProviderErrorKind, make_snippet,
    },
};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Thin client for the Anthropic Messages API.
#[derive(Debug)]
pub struct AnthropicService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_messages: String,
}

impl AnthropicService {
    /// Creates a new [`AnthropicService`] from the given config.
    ///
    /// Validates the provider, API key, and endpoint scheme. Builds an HTTP
    /// client with the `x-api-key`/`anthropic-version` headers and a
    /// configurable timeout.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `InvalidProvider` if `cfg.provider` is not Anthropic
    /// - [`AiLlmError::Provider`] with `MissingApiKey` if `cfg.api_key` is `None`
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::Anthropic {
            return Err(
                ProviderError::new(Provider::Anthropic, ProviderErrorKind::InvalidProvider)
                    .into(),
            );
        }

        let api_key = cfg.api_key.clone().ok_or_else(|| {
            ProviderError::new(Provider::Anthropic, ProviderErrorKind::MissingApiKey)
        })?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                Provider::Anthropic,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::HeaderName::from_static("x-api-key"),
            header::HeaderValue::from_str(&api_key).map_err(|e| {
                ProviderError::new(
                    Provider::Anthropic,
                    ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
                )
            })?,
        );
        headers.insert(
            header::HeaderName::from_static("anthropic-version"),
            header::HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_messages = format!("{}/v1/messages", base);

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "AnthropicService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_messages,
        })
    }

    /// Runs one multi-turn chat completion via `/v1/messages`.
    ///
    /// The Messages API keeps `system` separate from the turn history; any
    /// leading `system`-role message is lifted out of `messages` and sent
    /// as the top-level `system` field.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`AiLlmError::Provider`] with `Decode` if the JSON cannot be parsed
    /// - [`AiLlmError::Provider`] with `EmptyChoices` if no content blocks are returned
    pub async fn chat(&self, messages: &[crate::chat::ChatMessage]) -> Result<String, AiLlmError> {
        let started = Instant::now();

        let mut system: Option<&str> = None;
        let mut turns = Vec::with_capacity(messages.len());
        for m in messages {
            if system.is_none() && matches!(m.role, crate::chat::ChatRole::System) {
                system = Some(&m.content);
                continue;
            }
            turns.push(MessageTurn {
                role: m.role.as_str(),
                content: &m.content,
            });
        }

        let body = MessagesRequest {
            model: &self.cfg.model,
            system,
            messages: turns,
            max_tokens: self.cfg.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: self.cfg.temperature,
            top_p: self.cfg.top_p,
        };

        debug!(
            model = %self.cfg.model,
            endpoint = %self.cfg.endpoint,
            turns = messages.len(),
            "POST {}", self.url_messages
        );

        let resp = self
            .client
            .post(&self.url_messages)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_messages.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                endpoint = %self.cfg.endpoint,
                latency_ms = started.elapsed().as_millis(),
                "Anthropic /v1/messages returned non-success status"
            );

            return Err(ProviderError::new(
                Provider::Anthropic,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: MessagesResponse = resp.json().await.map_err(|e| {
            ProviderError::new(
                Provider::Anthropic,
                ProviderErrorKind::Decode(format!("serde error: {e}")),
            )
        })?;

        let content = out
            .content
            .into_iter()
            .find_map(|b| if b.kind == "text" { b.text } else { None })
            .ok_or_else(|| {
                ProviderError::new(Provider::Anthropic, ProviderErrorKind::EmptyChoices)
            })?;

        info!(
            model = %self.cfg.model,
            endpoint = %self.cfg.endpoint,
            latency_ms = started.elapsed().as_millis(),
            "chat turn completed"
        );

        Ok(content)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<MessageTurn<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Serialize)]
struct MessageTurn<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Anthropic,
            model: "claude-3-5-sonnet-latest".into(),
            endpoint: "https://api.anthropic.com".into(),
            api_key: Some("sk-ant-test".into()),
            max_tokens: Some(1024),
            temperature: None,
            top_p: None,
            timeout_secs: Some(60),
        }
    }

    #[test]
    fn rejects_wrong_provider() {
        let mut c = cfg();
        c.provider = LlmProvider::OpenAI;
        assert!(AnthropicService::new(c).is_err());
    }

    #[test]
    fn rejects_missing_api_key() {
        let mut c = cfg();
        c.api_key = None;
        assert!(AnthropicService::new(c).is_err());
    }

    #[test]
    fn rejects_bad_endpoint() {
        let mut c = cfg();
        c.endpoint = "ftp://example.com".into();
        assert!(AnthropicService::new(c).is_err());
    }

    #[test]
    fn builds_messages_url() {
        let svc = AnthropicService::new(cfg()).expect("valid config");
        assert_eq!(svc.url_messages, "https://api.anthropic.com/v1/messages");
    }
}
