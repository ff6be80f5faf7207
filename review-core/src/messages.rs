//! Queue message shapes carried on `orchestrator_queue`, `llm_queue` and
//! `git_queue` (spec §2, §6).

use serde::{Deserialize, Serialize};

use crate::model::Provider;

/// Message consumed from `orchestrator_queue`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum OrchestratorMessage {
    #[serde(rename = "START_PR_REVIEW")]
    StartPrReview {
        review_request_id: String,
        provider: Provider,
        repo: String,
        pr_number: u64,
        #[serde(default)]
        delivery_id: Option<String>,
    },
    #[serde(rename = "EVALUATE_CHUNK")]
    EvaluateChunk { chunk_id: String },
}

/// Message consumed from `llm_queue`. Carries only `chunk_id`; the chunk,
/// review request and conversation are read from shared state — any other
/// field is redundant and kept only for logging/debugging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmMessage {
    pub chunk_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_request_id: Option<String>,
}

/// Message consumed from `git_queue`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum GitMessage {
    #[serde(rename = "GIT_COMMENT")]
    GitComment { chunk_id: String },
    #[serde(rename = "TOOL_CALL")]
    ToolCall { chunk_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_pr_review_round_trips_through_json() {
        let msg = OrchestratorMessage::StartPrReview {
            review_request_id: "r1".into(),
            provider: Provider::Github,
            repo: "acme/widget".into(),
            pr_number: 5,
            delivery_id: Some("d1".into()),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"action\":\"START_PR_REVIEW\""));
        let back: OrchestratorMessage = serde_json::from_str(&json).unwrap();
        match back {
            OrchestratorMessage::StartPrReview { pr_number, .. } => assert_eq!(pr_number, 5),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn git_message_tags_action() {
        let msg = GitMessage::ToolCall {
            chunk_id: "c1".into(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"action":"TOOL_CALL","chunk_id":"c1"}"#);
    }
}
