//! Error hierarchy for the shared state store.

use thiserror::Error;

pub type StateStoreResult<T> = Result<T, StateStoreError>;

#[derive(Debug, Error)]
pub enum StateStoreError {
    #[error("[state-store] redis connection/command error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("[state-store] serde error reading key {key}: {source}")]
    Serde {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("[state-store] missing required environment variable: {0}")]
    MissingVar(&'static str),
}
