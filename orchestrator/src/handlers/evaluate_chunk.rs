//! `EVALUATE_CHUNK` handler — the central chunk state-machine step (spec
//! §4.2).

use review_core::messages::LlmMessage;
use review_core::model::ChunkStatus;
use review_mq::MqClient;
use state_store::StateStore;
use tracing::{debug, instrument, warn};

use crate::errors::OrchestratorResult;

#[instrument(skip(state, mq), fields(chunk_id))]
pub async fn handle(
    state: &StateStore,
    mq: &MqClient,
    llm_queue: &str,
    chunk_id: &str,
) -> OrchestratorResult<()> {
    let Some(mut chunk) = state.get_chunk(chunk_id).await? else {
        warn!(chunk_id, "EVALUATE_CHUNK for unknown chunk, dropping stale message");
        return Ok(());
    };

    match chunk.status {
        ChunkStatus::Pending | ChunkStatus::ContextReady => {
            chunk.status = ChunkStatus::LlmInProgress;
            state.put_chunk(&chunk).await?;
            mq.publish_json(
                llm_queue,
                &LlmMessage {
                    chunk_id: chunk.chunk_id.clone(),
                    review_request_id: Some(chunk.review_request_id.clone()),
                },
            )
            .await?;
        }
        other => {
            debug!(chunk_id, status = ?other, "EVALUATE_CHUNK no-op for non-evaluable status");
        }
    }

    Ok(())
}
