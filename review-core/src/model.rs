//! Domain records shared by the orchestrator, LLM worker and git worker.
//!
//! Every record here is stored verbatim as JSON at its key in the shared
//! state store; see [`crate::keys`] for the exact key layout.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A hosted source-control provider a webhook can originate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Github,
    Gitlab,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Github => write!(f, "github"),
            Provider::Gitlab => write!(f, "gitlab"),
        }
    }
}

/// Lifecycle status of a [`ReviewRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewRequestStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

/// One incoming PR/MR review job.
///
/// Created by the orchestrator on `START_PR_REVIEW`, mutated only by the
/// orchestrator, never deleted for the lifetime of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub review_request_id: String,
    pub repo_id: String,
    pub pr_id: u64,
    pub provider: Provider,
    pub status: ReviewRequestStatus,
    pub created_at: i64,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl ReviewRequest {
    pub fn base_sha(&self) -> Option<&str> {
        self.metadata.get("base_sha").map(String::as_str)
    }

    pub fn head_sha(&self) -> Option<&str> {
        self.metadata.get("head_sha").map(String::as_str)
    }
}

/// A chunk's position in the distributed state machine (spec §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChunkStatus {
    Pending,
    LlmInProgress,
    ToolRequired,
    ContextReady,
    CommentReady,
    Posted,
    Failed,
    Completed,
}

impl ChunkStatus {
    /// Terminal states are never re-entered nor re-enqueued.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ChunkStatus::Posted | ChunkStatus::Failed | ChunkStatus::Completed
        )
    }
}

/// One reviewable unit — a contiguous hunk of one file's diff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_id: String,
    pub review_request_id: String,
    pub diff_snippet: String,
    pub filename: String,
    pub start_line: u32,
    pub end_line: u32,
    #[serde(default)]
    pub context_level: u32,
    pub status: ChunkStatus,
    #[serde(default)]
    pub comment_body: Option<String>,
    #[serde(default)]
    pub line_number: Option<u32>,
    #[serde(default)]
    pub idempotency_hash: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Chunk {
    pub const META_LAST_TOOL: &'static str = "last_tool";
    pub const META_TOOL_ARGS: &'static str = "tool_args";
    pub const META_TOOL_OUTPUT: &'static str = "tool_output";

    pub fn last_tool(&self) -> Option<&str> {
        self.metadata.get(Self::META_LAST_TOOL).map(String::as_str)
    }

    pub fn tool_output(&self) -> Option<&str> {
        self.metadata
            .get(Self::META_TOOL_OUTPUT)
            .map(String::as_str)
    }
}

/// Conversational role, mirrored after the pluggable LLM backends' schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message inside a [`Conversation`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

/// The ordered sequence of messages exchanged with the model for one chunk.
///
/// Created on the first LLM turn, appended to on each subsequent turn,
/// discarded once the chunk reaches a terminal status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    pub messages: Vec<ConversationMessage>,
}

impl Conversation {
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(ConversationMessage {
            role,
            content: content.into(),
        });
    }
}
