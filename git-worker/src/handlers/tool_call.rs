//! `TOOL_CALL` handler — fetches repository context the model asked for
//! (spec §4.4).

use git_context_engine::git_providers::ProviderClient;
use git_context_engine::git_providers::types::ChangeRequestId;
use review_core::messages::OrchestratorMessage;
use review_core::model::{Chunk, ChunkStatus};
use review_mq::MqClient;
use state_store::StateStore;
use tracing::{instrument, warn};

use crate::config::GitWorkerConfig;
use crate::errors::GitWorkerResult;

#[instrument(skip(state, mq, config), fields(chunk_id))]
pub async fn handle(
    state: &StateStore,
    mq: &MqClient,
    config: &GitWorkerConfig,
    chunk_id: &str,
) -> GitWorkerResult<()> {
    let Some(mut chunk) = state.get_chunk(chunk_id).await? else {
        warn!(chunk_id, "TOOL_CALL for unknown chunk, dropping stale message");
        return Ok(());
    };

    if chunk.status.is_terminal() {
        return Ok(());
    }

    let Some(request) = state.get_review_request(&chunk.review_request_id).await? else {
        warn!(chunk_id, "TOOL_CALL for chunk with missing review request, dropping stale message");
        return Ok(());
    };

    let Some(tool) = chunk.last_tool().map(str::to_string) else {
        warn!(chunk_id, "chunk reached TOOL_CALL without last_tool, failing");
        chunk.status = ChunkStatus::Failed;
        state.put_chunk(&chunk).await?;
        return Ok(());
    };

    let output = match tool.as_str() {
        "read_file" | "get_file_structure" | "get_function_content" => {
            match crate::providers::client_for(request.provider, config) {
                Ok(client) => fetch_tool_output(&tool, &chunk, &request, &client).await,
                Err(err) => format!("Failed to reach provider: {err}"),
            }
        }
        other => format!("Unknown tool: {other}"),
    };

    chunk
        .metadata
        .insert(Chunk::META_TOOL_OUTPUT.to_string(), output);
    chunk.context_level += 1;
    chunk.status = ChunkStatus::ContextReady;
    state.put_chunk(&chunk).await?;

    mq.publish_json(
        &config.orchestrator_queue,
        &OrchestratorMessage::EvaluateChunk {
            chunk_id: chunk.chunk_id.clone(),
        },
    )
    .await?;

    Ok(())
}

fn tool_args_file_path(chunk: &Chunk) -> Option<String> {
    let raw = chunk.metadata.get(Chunk::META_TOOL_ARGS)?;
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    value
        .get("file_path")
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

async fn fetch_tool_output(
    tool: &str,
    chunk: &Chunk,
    request: &review_core::model::ReviewRequest,
    client: &ProviderClient,
) -> String {
    let file_path = tool_args_file_path(chunk).unwrap_or_else(|| chunk.filename.clone());
    let Some(head_sha) = request.head_sha() else {
        return format!("Unable to resolve head revision for {file_path}");
    };

    let id = ChangeRequestId {
        project: request.repo_id.clone(),
        iid: request.pr_id,
    };

    match client.fetch_file_raw_at_ref(&id, &file_path, head_sha).await {
        Ok(Some(bytes)) => {
            let content = String::from_utf8_lossy(&bytes).into_owned();
            if tool == "get_file_structure" {
                format!("File structure for {file_path}:\n{content}")
            } else {
                content
            }
        }
        Ok(None) => format!("File not found: {file_path}"),
        Err(err) => format!("Failed to fetch {file_path}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn chunk_with_args(args: Option<&str>) -> Chunk {
        let mut metadata = HashMap::new();
        if let Some(args) = args {
            metadata.insert(Chunk::META_TOOL_ARGS.to_string(), args.to_string());
        }
        Chunk {
            chunk_id: "c1".to_string(),
            review_request_id: "r1".to_string(),
            diff_snippet: String::new(),
            filename: "fallback.py".to_string(),
            start_line: 1,
            end_line: 1,
            context_level: 0,
            status: ChunkStatus::ToolRequired,
            comment_body: None,
            line_number: None,
            idempotency_hash: None,
            metadata,
        }
    }

    #[test]
    fn reads_file_path_from_tool_args() {
        let chunk = chunk_with_args(Some(r#"{"file_path":"utils.py"}"#));
        assert_eq!(tool_args_file_path(&chunk).as_deref(), Some("utils.py"));
    }

    #[test]
    fn falls_back_to_chunk_filename_when_args_missing() {
        let chunk = chunk_with_args(None);
        assert_eq!(tool_args_file_path(&chunk), None);
        assert_eq!(chunk.filename, "fallback.py");
    }

    #[test]
    fn falls_back_to_chunk_filename_when_args_malformed() {
        let chunk = chunk_with_args(Some("not json"));
        assert_eq!(tool_args_file_path(&chunk), None);
    }
}
