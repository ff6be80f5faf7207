//! One conversational turn per chunk (spec §4.3).

use ai_llm_service::chat::{ChatBackend, ChatMessage};
use review_core::messages::GitMessage;
use review_core::model::{Chunk, Role};
use review_mq::MqClient;
use state_store::StateStore;
use tracing::{debug, instrument, warn};

use crate::errors::LlmWorkerResult;
use crate::response::{self, LlmResponse};

fn to_chat_message(m: &review_core::model::ConversationMessage) -> ChatMessage {
    match m.role {
        Role::System => ChatMessage::system(m.content.clone()),
        Role::User => ChatMessage::user(m.content.clone()),
        Role::Assistant => ChatMessage::assistant(m.content.clone()),
    }
}

fn build_initial_user_message(repo_id: &str, pr_id: u64, chunk: &Chunk) -> String {
    format!(
        "repo_id: {repo_id}\npr_id: {pr_id}\nfilename: {}\n\nDiff hunk:\n{}\n\n\
         Respond with a single JSON object: either \
         {{\"model\":\"tool\",\"tool_call\":{{\"tool\":<name>,\"args\":<object>}}}} to request more \
         context, or {{\"model\":\"answer\",\"content\":[{{\"line\":<int>,\"comment\":<string>}},...]}} \
         with your review comments.",
        chunk.filename, chunk.diff_snippet
    )
}

#[instrument(skip(state, mq, backend), fields(chunk_id))]
pub async fn handle(
    state: &StateStore,
    mq: &MqClient,
    backend: &ChatBackend,
    git_queue: &str,
    system_prompt_name: &str,
    chunk_id: &str,
) -> LlmWorkerResult<()> {
    let Some(mut chunk) = state.get_chunk(chunk_id).await? else {
        warn!(chunk_id, "llm turn for unknown chunk, dropping stale message");
        return Ok(());
    };

    if chunk.status.is_terminal() {
        debug!(chunk_id, status = ?chunk.status, "chunk already terminal, skipping");
        return Ok(());
    }

    let Some(request) = state.get_review_request(&chunk.review_request_id).await? else {
        warn!(chunk_id, "llm turn for chunk with missing review request, dropping stale message");
        return Ok(());
    };

    let mut conversation = state
        .get_conversation(&chunk.review_request_id, chunk_id)
        .await?
        .unwrap_or_default();

    if conversation.messages.is_empty() {
        conversation.push(Role::System, response_prompt(system_prompt_name));
        conversation.push(
            Role::User,
            build_initial_user_message(&request.repo_id, request.pr_id, &chunk),
        );
    } else if let (Some(last_tool), Some(tool_output)) = (chunk.last_tool(), chunk.tool_output()) {
        // A non-empty conversation at this point means the chunk looped back
        // through CONTEXT_READY; the only other entry into this handler is a
        // never-before-seen chunk, which always starts with an empty
        // conversation.
        conversation.push(
            Role::User,
            format!("Tool `{last_tool}` returned:\n{tool_output}"),
        );
    }

    let chat_messages: Vec<ChatMessage> = conversation.messages.iter().map(to_chat_message).collect();

    let raw_response = match backend.generate_response(&chat_messages).await {
        Ok(text) => text,
        Err(err) => {
            warn!(chunk_id, %err, "llm backend call failed");
            return fail_chunk(state, &chunk.review_request_id, chunk).await;
        }
    };

    conversation.push(Role::Assistant, raw_response.clone());

    let parsed = match response::parse(&raw_response) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(chunk_id, %err, "llm response failed to parse");
            state
                .put_conversation(&chunk.review_request_id, chunk_id, &conversation)
                .await?;
            return fail_chunk(state, &chunk.review_request_id, chunk).await;
        }
    };

    match parsed {
        LlmResponse::Tool { tool_call } => {
            chunk
                .metadata
                .insert(Chunk::META_LAST_TOOL.to_string(), tool_call.tool);
            chunk.metadata.insert(
                Chunk::META_TOOL_ARGS.to_string(),
                serde_json::to_string(&tool_call.args).unwrap_or_default(),
            );
            chunk.status = review_core::model::ChunkStatus::ToolRequired;
            state.put_chunk(&chunk).await?;
            state
                .put_conversation(&chunk.review_request_id, chunk_id, &conversation)
                .await?;
            mq.publish_json(
                git_queue,
                &GitMessage::ToolCall {
                    chunk_id: chunk.chunk_id.clone(),
                },
            )
            .await?;
        }
        LlmResponse::Answer { content } if !content.is_empty() => {
            let first = &content[0];
            chunk.comment_body = Some(first.comment.clone());
            chunk.line_number = Some(first.line);
            chunk.status = review_core::model::ChunkStatus::CommentReady;
            state.put_chunk(&chunk).await?;
            state
                .put_conversation(&chunk.review_request_id, chunk_id, &conversation)
                .await?;
            mq.publish_json(
                git_queue,
                &GitMessage::GitComment {
                    chunk_id: chunk.chunk_id.clone(),
                },
            )
            .await?;
        }
        LlmResponse::Answer { .. } => {
            chunk.status = review_core::model::ChunkStatus::Completed;
            state.put_chunk(&chunk).await?;
            state
                .delete_conversation(&chunk.review_request_id, chunk_id)
                .await?;
        }
    }

    Ok(())
}

fn response_prompt(name: &str) -> &'static str {
    crate::prompts::lookup(name)
}

async fn fail_chunk(
    state: &StateStore,
    review_request_id: &str,
    mut chunk: Chunk,
) -> LlmWorkerResult<()> {
    chunk.status = review_core::model::ChunkStatus::Failed;
    state.put_chunk(&chunk).await?;
    state.delete_conversation(review_request_id, &chunk.chunk_id).await?;
    Ok(())
}
