//! Webhook ingress: authenticates, parses and filters provider webhooks,
//! then emits `START_PR_REVIEW` jobs onto `orchestrator_queue` (spec §4.1).

pub mod config;
pub mod error_handler;
pub mod routes;
pub mod signature;
pub mod state;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::config::IngressConfig;
use crate::error_handler::AppError;
use crate::state::AppState;

pub async fn start() -> Result<(), AppError> {
    let config = IngressConfig::from_env()?;

    let mq = review_mq::MqClient::connect(&config.rabbitmq_url).await?;
    mq.declare_queue(&config.orchestrator_queue).await?;

    let state = AppState::new(
        config.github_webhook_secret,
        config.gitlab_webhook_secret,
        mq,
        config.orchestrator_queue,
    );

    let app = Router::new()
        .route("/webhook/github", post(routes::github::receive_github_webhook))
        .route("/webhook/gitlab", post(routes::gitlab::receive_gitlab_webhook))
        .route("/health", get(routes::health::health))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(AppError::Bind)?;

    info!(addr = %config.bind_addr, "ingress listening");
    axum::serve(listener, app).await.map_err(AppError::Server)?;

    Ok(())
}
