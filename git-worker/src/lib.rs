//! Git Worker: executes the tool calls the LLM asked for and posts comments
//! idempotently to the originating provider (spec §4.4).

pub mod config;
pub mod errors;
pub mod handlers;
pub mod providers;

use review_core::messages::GitMessage;
use review_mq::MqClient;
use state_store::StateStore;

use crate::config::GitWorkerConfig;
use crate::errors::GitWorkerResult;

pub async fn dispatch(
    state: &StateStore,
    mq: &MqClient,
    config: &GitWorkerConfig,
    message: &GitMessage,
) -> GitWorkerResult<()> {
    match message {
        GitMessage::GitComment { chunk_id } => {
            handlers::git_comment::handle(state, config, chunk_id).await
        }
        GitMessage::ToolCall { chunk_id } => {
            handlers::tool_call::handle(state, mq, config, chunk_id).await
        }
    }
}
