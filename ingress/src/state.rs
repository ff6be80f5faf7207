//! Shared handler state, following the teacher's `core::app_state::AppState`
//! pattern (`api/src/core/app_state.rs`).

use std::sync::Arc;

use review_mq::MqClient;

#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub github_webhook_secret: Option<String>,
    pub gitlab_webhook_secret: Option<String>,
    pub mq: MqClient,
    pub orchestrator_queue: String,
}

impl AppState {
    pub fn new(
        github_webhook_secret: Option<String>,
        gitlab_webhook_secret: Option<String>,
        mq: MqClient,
        orchestrator_queue: String,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                github_webhook_secret,
                gitlab_webhook_secret,
                mq,
                orchestrator_queue,
            }),
        }
    }
}
