//! `GET /health`: always-200 liveness probe with no side effects (spec §6).

use axum::http::StatusCode;

pub async fn health() -> StatusCode {
    StatusCode::OK
}
