//! `POST /webhook/github` (spec §4.1, §6).

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use review_core::messages::OrchestratorMessage;
use review_core::model::Provider;

use crate::error_handler::{AppError, AppResult};
use crate::signature::verify_github_signature;
use crate::state::AppState;

const ACCEPTED_ACTIONS: &[&str] = &["opened", "synchronize", "reopened"];

#[derive(Debug, Deserialize)]
struct GitHubWebhookPayload {
    action: Option<String>,
    pull_request: Option<GitHubPullRequest>,
    repository: Option<GitHubRepository>,
}

#[derive(Debug, Deserialize)]
struct GitHubPullRequest {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct GitHubRepository {
    full_name: String,
}

#[derive(Serialize)]
pub struct WebhookAck {
    status: &'static str,
    message: &'static str,
}

pub fn ack() -> Json<WebhookAck> {
    Json(WebhookAck {
        status: "success",
        message: "Event received",
    })
}

pub async fn receive_github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> AppResult<Json<WebhookAck>> {
    let secret = state
        .inner
        .github_webhook_secret
        .as_deref()
        .ok_or(AppError::AuthNotConfigured)?;

    let signature = headers
        .get("X-Hub-Signature-256")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::InvalidSignature)?;

    if !verify_github_signature(secret.as_bytes(), &body, signature) {
        return Err(AppError::InvalidSignature);
    }

    let event = headers
        .get("X-GitHub-Event")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let delivery_id = headers
        .get("X-GitHub-Delivery")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let payload: GitHubWebhookPayload =
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let Some(action) = payload.action.as_deref() else {
        info!(event, "github webhook missing action, acknowledging without enqueue");
        return Ok(ack());
    };

    if event != "pull_request" || !ACCEPTED_ACTIONS.contains(&action) {
        info!(event, action, "github webhook filtered out, acknowledging without enqueue");
        return Ok(ack());
    }

    let (Some(pull_request), Some(repository)) = (payload.pull_request, payload.repository)
    else {
        warn!("github pull_request webhook missing pull_request/repository, dropping");
        return Ok(ack());
    };

    let review_request_id = services::uuid::new_id();
    let message = OrchestratorMessage::StartPrReview {
        review_request_id: review_request_id.clone(),
        provider: Provider::Github,
        repo: repository.full_name,
        pr_number: pull_request.number,
        delivery_id,
    };

    state
        .inner
        .mq
        .publish_json(&state.inner.orchestrator_queue, &message)
        .await?;

    info!(review_request_id, "enqueued START_PR_REVIEW from github webhook");
    Ok(ack())
}
