//! Builds a provider-specific [`ProviderClient`] from configuration and a
//! webhook-derived [`Provider`] (spec §4.5).

use git_context_engine::git_providers::types::ProviderKind;
use git_context_engine::git_providers::{ProviderClient, ProviderConfig};
use review_core::model::Provider;

use crate::config::OrchestratorConfig;
use crate::errors::OrchestratorResult;

pub fn client_for(provider: Provider, config: &OrchestratorConfig) -> OrchestratorResult<ProviderClient> {
    let cfg = match provider {
        Provider::Github => ProviderConfig {
            kind: ProviderKind::GitHub,
            base_api: config.github_base_url.clone(),
            token: format!("Bearer {}", config.github_token),
        },
        Provider::Gitlab => ProviderConfig {
            kind: ProviderKind::GitLab,
            base_api: config.gitlab_base_url.clone(),
            token: config.gitlab_token.clone(),
        },
    };
    Ok(ProviderClient::from_config(cfg)?)
}
