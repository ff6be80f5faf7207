//! Error hierarchy for the Git Worker process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitWorkerError {
    #[error("state store error: {0}")]
    StateStore(#[from] state_store::errors::StateStoreError),

    #[error("queue error: {0}")]
    Mq(#[from] review_mq::errors::MqError),

    #[error("git provider error: {0}")]
    GitContextEngine(#[from] git_context_engine::errors::GitContextEngineError),
}

pub type GitWorkerResult<T> = Result<T, GitWorkerError>;
