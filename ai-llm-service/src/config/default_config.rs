//! Default LLM configs loaded strictly from environment variables.
//!
//! This module provides convenience constructors for [`LlmModelConfig`], one
//! per supported chat backend (OpenAI, Anthropic, Ollama), plus
//! [`resolve_chat_backend_config`] which picks the active one per the
//! provider selection rule (explicit `LLM_PROVIDER`, else credential-based
//! auto-detection).
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_PROVIDER` = explicit backend selector (`openai`, `anthropic`, `ollama`)
//! - `LLM_MAX_TOKENS` = optional max tokens (u32)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError, env_opt_u32, must_env},
};

/// Resolves the Ollama endpoint strictly from environment.
///
/// Precedence:
/// 1. `OLLAMA_BASE_URL` if present and non-empty
/// 2. `OLLAMA_URL` if present and non-empty
/// 3. `OLLAMA_PORT` → `http://localhost:{port}`
///
/// # Errors
///
/// - [`ConfigError::MissingVar`] if all are missing
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn ollama_endpoint() -> Result<String, AiLlmError> {
    if let Ok(url) = std::env::var("OLLAMA_BASE_URL") {
        if !url.trim().is_empty() {
            return Ok(url.trim_end_matches('/').to_string());
        }
    }
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let _ = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Err(AiLlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

/* ===========================================================================
Per-chunk chat backends (spec §4.3/§4.5/§6)
======================================================================== */

/// Constructs the OpenAI config for the per-chunk chat backend.
///
/// # Env
/// - `OPENAI_API_KEY` (required)
/// - `OPENAI_MODEL` (required)
/// - `OPENAI_BASE_URL` (optional, default `https://api.openai.com`)
pub fn config_openai_chat() -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("OPENAI_API_KEY")?;
    let model = must_env("OPENAI_MODEL")?;
    let endpoint = std::env::var("OPENAI_BASE_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "https://api.openai.com".to_string());

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model,
        endpoint: endpoint.trim_end_matches('/').to_string(),
        api_key: Some(api_key),
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: None,
        top_p: None,
        timeout_secs: Some(60),
    })
}

/// Constructs the Anthropic config for the per-chunk chat backend.
///
/// # Env
/// - `ANTHROPIC_API_KEY` (required)
/// - `ANTHROPIC_MODEL` (required)
/// - `ANTHROPIC_BASE_URL` (optional, default `https://api.anthropic.com`)
pub fn config_anthropic_chat() -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("ANTHROPIC_API_KEY")?;
    let model = must_env("ANTHROPIC_MODEL")?;
    let endpoint = std::env::var("ANTHROPIC_BASE_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "https://api.anthropic.com".to_string());

    Ok(LlmModelConfig {
        provider: LlmProvider::Anthropic,
        model,
        endpoint: endpoint.trim_end_matches('/').to_string(),
        api_key: Some(api_key),
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: None,
        top_p: None,
        timeout_secs: Some(60),
    })
}

/// Constructs the Ollama config for the per-chunk chat backend.
///
/// # Env
/// - `OLLAMA_BASE_URL` (required, see [`ollama_endpoint`])
/// - `OLLAMA_MODEL` (required)
pub fn config_ollama_chat() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = ollama_endpoint()?;
    let model = must_env("OLLAMA_MODEL")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        api_key: None,
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: None,
        top_p: None,
        timeout_secs: Some(300),
    })
}

/// Resolves which chat backend to use, per spec.md §4.3's selection rule:
/// explicit `LLM_PROVIDER` wins; otherwise auto-detect by which credentials
/// are present, in the order OpenAI → Anthropic → Ollama.
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] if `LLM_PROVIDER` names an unknown backend
/// - [`ConfigError::NoBackendDetected`] if no explicit provider is set and no
///   credentials for any backend are present
pub fn resolve_chat_backend_config() -> Result<LlmModelConfig, AiLlmError> {
    match std::env::var("LLM_PROVIDER").ok().as_deref() {
        Some("openai") => return config_openai_chat(),
        Some("anthropic") => return config_anthropic_chat(),
        Some("ollama") => return config_ollama_chat(),
        Some("") | None => {}
        Some(other) => {
            return Err(AiLlmError::Config(ConfigError::UnsupportedProvider(
                other.to_string(),
            )));
        }
    }

    if std::env::var("OPENAI_API_KEY")
        .is_ok_and(|v| !v.trim().is_empty())
    {
        return config_openai_chat();
    }
    if std::env::var("ANTHROPIC_API_KEY")
        .is_ok_and(|v| !v.trim().is_empty())
    {
        return config_anthropic_chat();
    }
    if std::env::var("OLLAMA_BASE_URL")
        .is_ok_and(|v| !v.trim().is_empty())
    {
        return config_ollama_chat();
    }

    Err(AiLlmError::Config(ConfigError::NoBackendDetected))
}
