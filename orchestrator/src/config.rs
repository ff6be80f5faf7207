//! Typed configuration for the Orchestrator process (spec §6).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid number in {0}: expected a positive integer")]
    InvalidNumber(&'static str),
}

fn opt_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn strip_trailing_slash(url: String) -> String {
    url.strip_suffix('/').map(str::to_string).unwrap_or(url)
}

pub struct OrchestratorConfig {
    pub github_base_url: String,
    pub gitlab_base_url: String,
    pub github_token: String,
    pub gitlab_token: String,
    pub redis_url: String,
    pub rabbitmq_url: String,
    pub orchestrator_queue: String,
    pub llm_queue: String,
    pub max_hunk_changes: usize,
    pub ignored_extensions: String,
    pub ignored_files: String,
    pub ignored_directories: String,
}

impl OrchestratorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let max_hunk_changes = match opt_env("MAX_HUNK_CHANGES") {
            Some(v) => v
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidNumber("MAX_HUNK_CHANGES"))?,
            None => review_core::chunking::DEFAULT_MAX_HUNK_CHANGES,
        };

        Ok(Self {
            github_base_url: strip_trailing_slash(
                opt_env("GITHUB_BASE_URL").unwrap_or_else(|| "https://api.github.com".to_string()),
            ),
            gitlab_base_url: strip_trailing_slash(
                opt_env("GITLAB_BASE_URL")
                    .unwrap_or_else(|| "https://gitlab.com/api/v4".to_string()),
            ),
            github_token: opt_env("GITHUB_TOKEN").unwrap_or_default(),
            gitlab_token: opt_env("GITLAB_TOKEN").unwrap_or_default(),
            redis_url: opt_env("REDIS_URL").unwrap_or_else(|| "redis://127.0.0.1".to_string()),
            rabbitmq_url: opt_env("RABBITMQ_URL")
                .unwrap_or_else(|| "amqp://127.0.0.1:5672/%2f".to_string()),
            orchestrator_queue: opt_env("ORCHESTRATOR_QUEUE")
                .unwrap_or_else(|| "orchestrator_queue".to_string()),
            llm_queue: opt_env("LLM_QUEUE").unwrap_or_else(|| "llm_queue".to_string()),
            max_hunk_changes,
            ignored_extensions: opt_env("IGNORED_EXTENSIONS").unwrap_or_default(),
            ignored_files: opt_env("IGNORED_FILES").unwrap_or_default(),
            ignored_directories: opt_env("IGNORED_DIRECTORIES").unwrap_or_default(),
        })
    }
}
