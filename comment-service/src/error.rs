use crate::services::providers::ProviderError;
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failure of a single comment request.
///
/// Every kind renders as `500 {"error": "..."}`; callers only see the message.
#[derive(Debug, Error)]
pub enum CommentError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Bad input: {0}")]
    BadInput(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl CommentError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            CommentError::Configuration(_) => "configuration",
            CommentError::BadInput(_) => "bad_input",
            CommentError::Upstream(_) => "upstream",
        }
    }
}

impl From<ProviderError> for CommentError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(msg) => CommentError::Configuration(msg),
            other => CommentError::Upstream(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CommentError {
    fn from(err: serde_json::Error) -> Self {
        CommentError::BadInput(format!("invalid JSON body: {}", err))
    }
}

impl From<BytesRejection> for CommentError {
    fn from(rejection: BytesRejection) -> Self {
        CommentError::BadInput(rejection.body_text())
    }
}

impl IntoResponse for CommentError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
