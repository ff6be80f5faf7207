//! Orchestrator: decomposes a PR diff into reviewable chunks, filters them,
//! and drives each chunk through the review state machine (spec §4.2).

pub mod config;
pub mod errors;
pub mod handlers;
pub mod providers;

use review_core::messages::OrchestratorMessage;
use review_mq::MqClient;
use state_store::StateStore;

use crate::config::OrchestratorConfig;
use crate::errors::OrchestratorResult;

pub async fn dispatch(
    state: &StateStore,
    mq: &MqClient,
    config: &OrchestratorConfig,
    message: &OrchestratorMessage,
) -> OrchestratorResult<()> {
    match message {
        OrchestratorMessage::StartPrReview {
            review_request_id,
            provider,
            repo,
            pr_number,
            ..
        } => {
            let client = providers::client_for(*provider, config)?;
            handlers::start_pr_review::handle(
                state,
                mq,
                &client,
                config,
                review_request_id,
                *provider,
                repo,
                *pr_number,
            )
            .await
        }
        OrchestratorMessage::EvaluateChunk { chunk_id } => {
            handlers::evaluate_chunk::handle(state, mq, &config.llm_queue, chunk_id).await
        }
    }
}
