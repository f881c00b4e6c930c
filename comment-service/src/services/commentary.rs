//! One comment request, end to end: prompt, upstream call, fallback.

use super::metrics;
use super::prompt_builder::build_prompt;
use super::providers::ChatProvider;
use crate::error::CommentError;
use crate::models::{CommentRequest, CompletionResult};

/// Reply used when the chat API answers without any text.
pub const FALLBACK_COMMENT: &str = "老师正在喝茶，没空理你...";

/// Build the prompt for `request`, make exactly one provider call and
/// return the comment text.
#[tracing::instrument(skip_all, fields(mode = request.mode()))]
pub async fn generate_comment(
    provider: &dyn ChatProvider,
    request: &CommentRequest,
    request_id: Option<&str>,
) -> Result<CompletionResult, CommentError> {
    metrics::record_request(request.mode());

    let payload = build_prompt(request);
    let content = provider.complete(&payload, request_id).await?;

    let comment = match content {
        Some(text) => text,
        None => {
            tracing::warn!("Chat API returned no content, using fallback comment");
            metrics::record_fallback();
            FALLBACK_COMMENT.to_string()
        }
    };

    Ok(CompletionResult { comment })
}
