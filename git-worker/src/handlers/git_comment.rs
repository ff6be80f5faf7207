//! `GIT_COMMENT` handler — posts a chunk's comment idempotently (spec §4.4).

use git_context_engine::git_providers::types::{
    ChangeRequestId, CommentLineKind, CommentLocation, CommentSide, DiffRefs, InlineCommentDraft,
};
use review_core::idempotency;
use review_core::model::ChunkStatus;
use state_store::StateStore;
use tracing::{instrument, warn};

use crate::config::GitWorkerConfig;
use crate::errors::GitWorkerResult;

/// 24 hours, matching the marker's TTL (spec §3, §4.4).
const POSTED_MARKER_TTL_SECS: u64 = 24 * 60 * 60;

#[instrument(skip(state, config), fields(chunk_id))]
pub async fn handle(state: &StateStore, config: &GitWorkerConfig, chunk_id: &str) -> GitWorkerResult<()> {
    let Some(mut chunk) = state.get_chunk(chunk_id).await? else {
        warn!(chunk_id, "GIT_COMMENT for unknown chunk, dropping stale message");
        return Ok(());
    };

    if chunk.status.is_terminal() {
        return Ok(());
    }

    let Some(request) = state.get_review_request(&chunk.review_request_id).await? else {
        warn!(chunk_id, "GIT_COMMENT for chunk with missing review request, dropping stale message");
        return Ok(());
    };

    let (Some(comment_body), Some(line_number)) = (chunk.comment_body.clone(), chunk.line_number) else {
        warn!(chunk_id, "chunk reached GIT_COMMENT without a comment body/line, failing");
        chunk.status = ChunkStatus::Failed;
        state.put_chunk(&chunk).await?;
        return Ok(());
    };

    let hash = chunk.idempotency_hash.clone().unwrap_or_else(|| {
        idempotency::compute(&chunk.filename, line_number, &comment_body)
    });
    chunk.idempotency_hash = Some(hash.clone());

    let claimed = state
        .try_claim_posted_marker(&request.repo_id, request.pr_id, &hash, POSTED_MARKER_TTL_SECS)
        .await?;

    if !claimed {
        // Another chunk already posted this exact (filename, line, body) triple.
        chunk.status = ChunkStatus::Posted;
        state.put_chunk(&chunk).await?;
        return Ok(());
    }

    let Some(head_sha) = request.head_sha().map(str::to_string) else {
        warn!(chunk_id, "GIT_COMMENT for request with no head_sha recorded, failing");
        state.release_posted_marker(&request.repo_id, request.pr_id, &hash).await?;
        chunk.status = ChunkStatus::Failed;
        state.put_chunk(&chunk).await?;
        return Ok(());
    };

    let client = match crate::providers::client_for(request.provider, config) {
        Ok(client) => client,
        Err(err) => {
            warn!(chunk_id, %err, "failed to build provider client for comment posting");
            state.release_posted_marker(&request.repo_id, request.pr_id, &hash).await?;
            chunk.status = ChunkStatus::Failed;
            state.put_chunk(&chunk).await?;
            return Ok(());
        }
    };

    let id = ChangeRequestId {
        project: request.repo_id.clone(),
        iid: request.pr_id,
    };

    // GitLab properly needs a distinct start_sha; this client only retains
    // base/head on the ReviewRequest (see DESIGN.md), so start_sha defaults
    // to base_sha.
    let diff_refs = DiffRefs {
        base_sha: request.base_sha().unwrap_or(&head_sha).to_string(),
        start_sha: None,
        head_sha: head_sha.clone(),
    };

    let draft = InlineCommentDraft {
        location: CommentLocation {
            file_path: chunk.filename.clone(),
            line: line_number,
            line_kind: CommentLineKind::Added,
            side: CommentSide::Right,
            diff_refs: diff_refs.clone(),
        },
        body: comment_body,
    };

    match client.post_inline_comments(&id, &diff_refs, &[draft]).await {
        Ok(()) => {
            chunk.status = ChunkStatus::Posted;
            state.put_chunk(&chunk).await?;
        }
        Err(err) => {
            warn!(chunk_id, %err, "provider comment posting failed");
            state.release_posted_marker(&request.repo_id, request.pr_id, &hash).await?;
            chunk.status = ChunkStatus::Failed;
            state.put_chunk(&chunk).await?;
        }
    }

    Ok(())
}
