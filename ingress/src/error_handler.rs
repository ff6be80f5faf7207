//! Request-facing error type, mirroring the teacher's `AppError`/`ErrorBody`
//! pattern (`api/src/error_handler.rs`).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    #[error("queue error: {0}")]
    Mq(#[from] review_mq::errors::MqError),

    #[error("invalid webhook signature")]
    InvalidSignature,

    #[error("webhook authentication is not configured for this provider")]
    AuthNotConfigured,

    #[error("malformed webhook payload: {0}")]
    BadRequest(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Bind(_) | AppError::Server(_) | AppError::Mq(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::InvalidSignature => StatusCode::UNAUTHORIZED,
            AppError::AuthNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Mq(_) => "QUEUE_ERROR",
            AppError::InvalidSignature => "INVALID_SIGNATURE",
            AppError::AuthNotConfigured => "AUTH_NOT_CONFIGURED",
            AppError::BadRequest(_) => "BAD_REQUEST",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
