//! Error hierarchy for the LLM Worker process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmWorkerError {
    #[error("state store error: {0}")]
    StateStore(#[from] state_store::errors::StateStoreError),

    #[error("queue error: {0}")]
    Mq(#[from] review_mq::errors::MqError),

    #[error("llm backend error: {0}")]
    Backend(#[from] ai_llm_service::error_handler::AiLlmError),
}

pub type LlmWorkerResult<T> = Result<T, LlmWorkerError>;
