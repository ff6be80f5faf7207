//! Typed configuration for the LLM Worker process (spec §6).

fn opt_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

pub struct LlmWorkerConfig {
    pub redis_url: String,
    pub rabbitmq_url: String,
    pub llm_queue: String,
    pub git_queue: String,
    pub system_prompt_name: String,
}

impl LlmWorkerConfig {
    pub fn from_env() -> Self {
        Self {
            redis_url: opt_env("REDIS_URL").unwrap_or_else(|| "redis://127.0.0.1".to_string()),
            rabbitmq_url: opt_env("RABBITMQ_URL")
                .unwrap_or_else(|| "amqp://127.0.0.1:5672/%2f".to_string()),
            llm_queue: opt_env("LLM_QUEUE").unwrap_or_else(|| "llm_queue".to_string()),
            git_queue: opt_env("GIT_QUEUE").unwrap_or_else(|| "git_queue".to_string()),
            system_prompt_name: opt_env("SYSTEM_PROMPT_NAME")
                .unwrap_or_else(|| "performance".to_string()),
        }
    }
}
