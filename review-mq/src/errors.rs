//! Error hierarchy for the durable queue client.

use thiserror::Error;

pub type MqResult<T> = Result<T, MqError>;

#[derive(Debug, Error)]
pub enum MqError {
    #[error("[review-mq] broker connection/channel error: {0}")]
    Lapin(#[from] lapin::Error),

    #[error("[review-mq] failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),
}
