//! Typed configuration for the Git Worker process (spec §6).

fn opt_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn strip_trailing_slash(url: String) -> String {
    url.strip_suffix('/').map(str::to_string).unwrap_or(url)
}

pub struct GitWorkerConfig {
    pub github_base_url: String,
    pub gitlab_base_url: String,
    pub github_token: String,
    pub gitlab_token: String,
    pub redis_url: String,
    pub rabbitmq_url: String,
    pub orchestrator_queue: String,
    pub git_queue: String,
}

impl GitWorkerConfig {
    pub fn from_env() -> Self {
        Self {
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
            git_queue: opt_env("GIT_QUEUE").unwrap_or_else(|| "git_queue".to_string()),
        }
    }
}
