//! `POST /webhook/gitlab` (spec §4.1, §6).

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use serde::Deserialize;
use tracing::{info, warn};

use review_core::messages::OrchestratorMessage;
use review_core::model::Provider;

use crate::error_handler::{AppError, AppResult};
use crate::routes::github::WebhookAck;
use crate::signature::verify_gitlab_token;
use crate::state::AppState;

const ACCEPTED_ACTIONS: &[&str] = &["open", "update", "reopen"];

#[derive(Debug, Deserialize)]
struct GitLabWebhookPayload {
    object_kind: String,
    object_attributes: Option<GitLabObjectAttributes>,
    project: Option<GitLabProject>,
}

#[derive(Debug, Deserialize)]
struct GitLabObjectAttributes {
    action: Option<String>,
    iid: u64,
}

#[derive(Debug, Deserialize)]
struct GitLabProject {
    path_with_namespace: String,
}

pub async fn receive_gitlab_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> AppResult<Json<WebhookAck>> {
    let secret = state
        .inner
        .gitlab_webhook_secret
        .as_deref()
        .ok_or(AppError::AuthNotConfigured)?;

    let token = headers
        .get("X-Gitlab-Token")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::InvalidSignature)?;

    if !verify_gitlab_token(secret, token) {
        return Err(AppError::InvalidSignature);
    }

    let event = headers
        .get("X-Gitlab-Event")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let payload: GitLabWebhookPayload =
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    if event != "Merge Request Hook" || payload.object_kind != "merge_request" {
        info!(event, "gitlab webhook filtered out, acknowledging without enqueue");
        return Ok(crate::routes::github::ack());
    }

    let (Some(attrs), Some(project)) = (payload.object_attributes, payload.project) else {
        warn!("gitlab merge_request webhook missing object_attributes/project, dropping");
        return Ok(crate::routes::github::ack());
    };

    let Some(action) = attrs.action.as_deref() else {
        info!("gitlab webhook missing action, acknowledging without enqueue");
        return Ok(crate::routes::github::ack());
    };

    if !ACCEPTED_ACTIONS.contains(&action) {
        info!(action, "gitlab webhook action filtered out, acknowledging without enqueue");
        return Ok(crate::routes::github::ack());
    }

    let review_request_id = services::uuid::new_id();
    let message = OrchestratorMessage::StartPrReview {
        review_request_id: review_request_id.clone(),
        provider: Provider::Gitlab,
        repo: project.path_with_namespace,
        pr_number: attrs.iid,
        delivery_id: headers
            .get("X-Gitlab-Event-UUID")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };

    state
        .inner
        .mq
        .publish_json(&state.inner.orchestrator_queue, &message)
        .await?;

    info!(review_request_id, "enqueued START_PR_REVIEW from gitlab webhook");
    Ok(crate::routes::github::ack())
}
