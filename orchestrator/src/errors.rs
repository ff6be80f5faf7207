//! Error hierarchy for the Orchestrator process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("state store error: {0}")]
    StateStore(#[from] state_store::errors::StateStoreError),

    #[error("queue error: {0}")]
    Mq(#[from] review_mq::errors::MqError),

    #[error("git provider error: {0}")]
    GitContextEngine(#[from] git_context_engine::errors::GitContextEngineError),
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
