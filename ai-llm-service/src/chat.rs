//! Provider-agnostic chat turn and backend dispatch for the per-chunk
//! conversational review loop.
//!
//! [`ChatBackend`] is a closed enum over the three concrete chat clients
//! (OpenAI, Anthropic, Ollama), dispatched by `match` rather than through a
//! trait object or `async-trait`, following the same facade style as
//! `git-context-engine`'s `ProviderClient`.

use tracing::instrument;

use crate::config::default_config::resolve_chat_backend_config;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::AiLlmError;
use crate::services::anthropic_service::AnthropicService;
use crate::services::ollama_service::OllamaService;
use crate::services::open_ai_service::OpenAiService;

/// Role of a single turn in a conversation sent to a chat backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    /// Lowercase wire form used by all three backends' message payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// A single turn in a conversation passed to [`ChatBackend::generate_response`].
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Pluggable chat backend for the per-chunk conversational turn.
///
/// Selection rule (spec.md §4.3/§4.5): an explicit `LLM_PROVIDER` env var
/// wins; otherwise the backend is auto-detected from which credentials are
/// present, in order OpenAI -> Anthropic -> Ollama.
pub enum ChatBackend {
    OpenAi(OpenAiService),
    Anthropic(AnthropicService),
    Ollama(OllamaService),
}

impl ChatBackend {
    /// Builds the backend selected by [`resolve_chat_backend_config`].
    ///
    /// # Errors
    /// Propagates [`AiLlmError::Config`] if no backend can be resolved, or
    /// [`AiLlmError::Provider`]/[`AiLlmError::HttpTransport`] if the selected
    /// backend's client cannot be constructed.
    pub fn from_env() -> Result<Self, AiLlmError> {
        let cfg = resolve_chat_backend_config()?;
        Self::from_provider(cfg.provider, cfg)
    }

    fn from_provider(
        provider: LlmProvider,
        cfg: crate::config::llm_model_config::LlmModelConfig,
    ) -> Result<Self, AiLlmError> {
        match provider {
            LlmProvider::OpenAI => Ok(ChatBackend::OpenAi(OpenAiService::new(cfg)?)),
            LlmProvider::Anthropic => Ok(ChatBackend::Anthropic(AnthropicService::new(cfg)?)),
            LlmProvider::Ollama => Ok(ChatBackend::Ollama(OllamaService::new(cfg)?)),
        }
    }

    /// Sends `messages` to the configured backend and returns the assistant's
    /// raw text reply (expected, but not required, to be a JSON object per
    /// spec.md §4.3).
    #[instrument(skip_all, fields(backend = %self.provider_name()))]
    pub async fn generate_response(&self, messages: &[ChatMessage]) -> Result<String, AiLlmError> {
        match self {
            ChatBackend::OpenAi(svc) => Ok(svc.chat(messages).await?),
            ChatBackend::Anthropic(svc) => Ok(svc.chat(messages).await?),
            ChatBackend::Ollama(svc) => Ok(svc.chat(messages).await?),
        }
    }

    fn provider_name(&self) -> &'static str {
        match self {
            ChatBackend::OpenAi(_) => "openai",
            ChatBackend::Anthropic(_) => "anthropic",
            ChatBackend::Ollama(_) => "ollama",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_forms() {
        assert_eq!(ChatRole::System.as_str(), "system");
        assert_eq!(ChatRole::User.as_str(), "user");
        assert_eq!(ChatRole::Assistant.as_str(), "assistant");
    }

    #[test]
    fn message_constructors_set_role() {
        let m = ChatMessage::user("hello");
        assert_eq!(m.role, ChatRole::User);
        assert_eq!(m.content, "hello");
    }
}
