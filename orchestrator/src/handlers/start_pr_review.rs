//! `START_PR_REVIEW` handler (spec §4.2).

use std::time::{SystemTime, UNIX_EPOCH};

use git_context_engine::git_providers::ProviderClient;
use git_context_engine::git_providers::types::{ChangeRequestId, FileChange};
use review_core::chunking::chunk_file_diff;
use review_core::filters::{RelevancyFilter, is_semantic_noise};
use review_core::messages::OrchestratorMessage;
use review_core::model::{Chunk, Provider, ReviewRequest, ReviewRequestStatus};
use review_mq::MqClient;
use state_store::StateStore;
use tracing::{info, instrument, warn};

use crate::config::OrchestratorConfig;
use crate::errors::OrchestratorResult;

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[instrument(skip(state, mq, client, config), fields(review_request_id, repo, pr_number))]
#[allow(clippy::too_many_arguments)]
pub async fn handle(
    state: &StateStore,
    mq: &MqClient,
    client: &ProviderClient,
    config: &OrchestratorConfig,
    review_request_id: &str,
    provider: Provider,
    repo: &str,
    pr_number: u64,
) -> OrchestratorResult<()> {
    let mut request = ReviewRequest {
        review_request_id: review_request_id.to_string(),
        repo_id: repo.to_string(),
        pr_id: pr_number,
        provider,
        status: ReviewRequestStatus::InProgress,
        created_at: now_secs(),
        metadata: Default::default(),
    };
    state.put_review_request(&request).await?;

    let id = ChangeRequestId {
        project: repo.to_string(),
        iid: pr_number,
    };

    let bundle = match client.fetch_bundle(&id).await {
        Ok(bundle) => bundle,
        Err(err) => {
            warn!(review_request_id, %err, "diff/metadata fetch failed, failing request");
            request.status = ReviewRequestStatus::Failed;
            request
                .metadata
                .insert("reason".to_string(), format!("diff/metadata fetch failed: {err}"));
            state.put_review_request(&request).await?;
            return Ok(());
        }
    };

    let base_sha = bundle.meta.diff_refs.base_sha.clone();
    let head_sha = bundle.meta.diff_refs.head_sha.clone();
    request.metadata.insert("base_sha".to_string(), base_sha.clone());
    request.metadata.insert("head_sha".to_string(), head_sha.clone());
    state.put_review_request(&request).await?;

    let filter = RelevancyFilter::from_env_lists(
        &config.ignored_extensions,
        &config.ignored_files,
        &config.ignored_directories,
    );

    let tasks = bundle.changes.files.into_iter().map(|file| {
        let filter = filter.clone();
        let client = client.clone();
        let id = id.clone();
        let review_request_id = review_request_id.to_string();
        let base_sha = base_sha.clone();
        let head_sha = head_sha.clone();
        let max_hunk_changes = config.max_hunk_changes;
        async move {
            process_file(
                &filter,
                &client,
                &id,
                &review_request_id,
                file,
                &base_sha,
                &head_sha,
                max_hunk_changes,
            )
            .await
        }
    });

    let chunks: Vec<Chunk> = futures::future::join_all(tasks).await.into_iter().flatten().collect();

    if chunks.is_empty() {
        request.status = ReviewRequestStatus::Completed;
        request
            .metadata
            .insert("reason".to_string(), "No reviewable changes found".to_string());
        state.put_review_request(&request).await?;
        return Ok(());
    }

    for chunk in chunks {
        state.put_chunk(&chunk).await?;
        state
            .add_chunk_to_request(review_request_id, &chunk.chunk_id)
            .await?;
        mq.publish_json(
            &config.orchestrator_queue,
            &OrchestratorMessage::EvaluateChunk {
                chunk_id: chunk.chunk_id,
            },
        )
        .await?;
    }

    info!(review_request_id, "chunks enqueued for evaluation");
    Ok(())
}

/// Runs the relevancy filter, semantic-change filter and hunk chunking for
/// one file, in isolation from the other files in the request (spec §4.2,
/// §5: "each file is an independent task").
#[allow(clippy::too_many_arguments)]
async fn process_file(
    filter: &RelevancyFilter,
    client: &ProviderClient,
    id: &ChangeRequestId,
    review_request_id: &str,
    file: FileChange,
    base_sha: &str,
    head_sha: &str,
    max_hunk_changes: usize,
) -> Vec<Chunk> {
    let filename = file
        .new_path
        .clone()
        .or_else(|| file.old_path.clone())
        .unwrap_or_default();
    let patch = file.raw_unidiff.clone().unwrap_or_default();
    let has_patch = !file.is_binary && !patch.trim().is_empty();

    if filter.should_skip(&filename, has_patch) {
        return Vec::new();
    }

    if !file.is_new && !file.is_deleted {
        let old = client.fetch_file_raw_at_ref(id, &filename, base_sha).await;
        let new = client.fetch_file_raw_at_ref(id, &filename, head_sha).await;
        match (old, new) {
            (Ok(Some(old_bytes)), Ok(Some(new_bytes))) => {
                let old_text = String::from_utf8_lossy(&old_bytes);
                let new_text = String::from_utf8_lossy(&new_bytes);
                if is_semantic_noise(&old_text, &new_text) {
                    return Vec::new();
                }
            }
            (Err(err), _) | (_, Err(err)) => {
                warn!(filename, %err, "semantic-change fetch failed, proceeding (fail-open)");
            }
            _ => {}
        }
    }

    chunk_file_diff(
        review_request_id,
        &filename,
        &patch,
        max_hunk_changes,
        services::uuid::new_id,
    )
}
