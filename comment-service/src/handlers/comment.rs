use crate::error::CommentError;
use crate::models::{CommentRequest, CompletionResult, RawCommentRequest};
use crate::services::{generate_comment, metrics};
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::HeaderMap,
    Json,
};
use service_core::observability::extract_request_id;

/// `POST /comment`: classify the body, ask the chat API once, relay the text.
///
/// The body is read raw so that malformed JSON and unreadable bodies report
/// through [`CommentError`] like every other failure.
pub async fn comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CompletionResult>, CommentError> {
    let request_id = extract_request_id(&headers);

    match handle(&state, body, request_id.as_deref()).await {
        Ok(completion) => Ok(Json(completion)),
        Err(err) => {
            tracing::error!(kind = err.kind(), error = %err, "Comment request failed");
            metrics::record_error(err.kind());
            Err(err)
        }
    }
}

async fn handle(
    state: &AppState,
    body: Result<Bytes, BytesRejection>,
    request_id: Option<&str>,
) -> Result<CompletionResult, CommentError> {
    let body = body?;
    let raw: RawCommentRequest = serde_json::from_slice(&body)?;

    // A missing credential wins over any problem with the fields.
    if !state.provider.is_configured() {
        return Err(CommentError::Configuration(
            "chat API key is not configured".to_string(),
        ));
    }

    let request = CommentRequest::classify(raw)?;
    generate_comment(state.provider.as_ref(), &request, request_id).await
}
