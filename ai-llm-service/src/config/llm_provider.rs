/// Represents the provider (backend) used for large language model (LLM) inference.
///
/// This enum distinguishes between the concrete backends this crate can talk
/// to. Each variant corresponds to one pluggable implementation of the
/// `generate`/chat call; selection between them is a closed enum dispatch,
/// not a trait object, matching `git-context-engine`'s `ProviderClient`
/// style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime for on-device inference.
    Ollama,
    /// OpenAI's chat completions API.
    OpenAI,
    /// Anthropic's messages API.
    Anthropic,
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProvider::Ollama => write!(f, "ollama"),
            LlmProvider::OpenAI => write!(f, "openai"),
            LlmProvider::Anthropic => write!(f, "anthropic"),
        }
    }
}
