//! Typed configuration for the ingress process, loaded once at boot.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Fail-fast rule from spec §6: at least one webhook secret must be set.
    #[error(
        "at least one of GITHUB_WEBHOOK_SECRET or GITLAB_WEBHOOK_SECRET must be set"
    )]
    NoWebhookSecret,

    #[error("invalid bind address {0:?}: {1}")]
    InvalidBindAddr(String, std::net::AddrParseError),
}

fn opt_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Configuration for the ingress HTTP server.
pub struct IngressConfig {
    pub bind_addr: std::net::SocketAddr,
    pub github_webhook_secret: Option<String>,
    pub gitlab_webhook_secret: Option<String>,
    pub rabbitmq_url: String,
    pub orchestrator_queue: String,
}

impl IngressConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let github_webhook_secret = opt_env("GITHUB_WEBHOOK_SECRET");
        let gitlab_webhook_secret = opt_env("GITLAB_WEBHOOK_SECRET");
        if github_webhook_secret.is_none() && gitlab_webhook_secret.is_none() {
            return Err(ConfigError::NoWebhookSecret);
        }

        let bind_addr_raw = opt_env("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let bind_addr = bind_addr_raw
            .parse()
            .map_err(|e| ConfigError::InvalidBindAddr(bind_addr_raw.clone(), e))?;

        let rabbitmq_url =
            opt_env("RABBITMQ_URL").unwrap_or_else(|| "amqp://127.0.0.1:5672/%2f".to_string());
        let orchestrator_queue =
            opt_env("ORCHESTRATOR_QUEUE").unwrap_or_else(|| "orchestrator_queue".to_string());

        Ok(Self {
            bind_addr,
            github_webhook_secret,
            gitlab_webhook_secret,
            rabbitmq_url,
            orchestrator_queue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn rejects_when_no_secret_is_set() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("GITHUB_WEBHOOK_SECRET");
            std::env::remove_var("GITLAB_WEBHOOK_SECRET");
        }
        assert!(matches!(
            IngressConfig::from_env(),
            Err(ConfigError::NoWebhookSecret)
        ));
    }

    #[test]
    fn accepts_github_secret_alone() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("GITHUB_WEBHOOK_SECRET", "s");
            std::env::remove_var("GITLAB_WEBHOOK_SECRET");
        }
        assert!(IngressConfig::from_env().is_ok());
        unsafe {
            std::env::remove_var("GITHUB_WEBHOOK_SECRET");
        }
    }
}
