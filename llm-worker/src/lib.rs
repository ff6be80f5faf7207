//! LLM Worker: advances one chunk's conversation per message, deciding
//! whether it needs more context or is ready for a posted comment (spec
//! §4.3).

pub mod config;
pub mod errors;
pub mod handler;
pub mod prompts;
pub mod response;

use ai_llm_service::chat::ChatBackend;
use review_mq::MqClient;
use state_store::StateStore;

use crate::config::LlmWorkerConfig;
use crate::errors::LlmWorkerResult;

pub async fn dispatch(
    state: &StateStore,
    mq: &MqClient,
    backend: &ChatBackend,
    config: &LlmWorkerConfig,
    chunk_id: &str,
) -> LlmWorkerResult<()> {
    handler::handle(
        state,
        mq,
        backend,
        &config.git_queue,
        &config.system_prompt_name,
        chunk_id,
    )
    .await
}
