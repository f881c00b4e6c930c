//! DeepSeek chat-completion provider.
//!
//! Speaks the OpenAI-compatible `/chat/completions` protocol, so any
//! endpoint with the same shape can be configured in its place.

use super::{ChatProvider, ProviderError};
use crate::config::DeepSeekConfig;
use crate::models::{ChatMessage, PromptPayload};
use crate::services::metrics;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use service_core::observability::trace_headers;
use std::time::{Duration, Instant};

/// Upstream error bodies are cut to this many characters before they reach
/// logs or the caller.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// DeepSeek provider.
pub struct DeepSeekProvider {
    config: DeepSeekConfig,
    client: Client,
}

impl DeepSeekProvider {
    pub fn new(config: DeepSeekConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl ChatProvider for DeepSeekProvider {
    async fn complete(
        &self,
        payload: &PromptPayload,
        request_id: Option<&str>,
    ) -> Result<Option<String>, ProviderError> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            ProviderError::NotConfigured("chat API key is not configured".to_string())
        })?;

        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: payload.to_chat_messages(),
            temperature: payload.temperature,
            max_tokens: payload.max_tokens,
        };

        tracing::debug!(
            model = %self.config.model,
            message_count = request.messages.len(),
            temperature = payload.temperature,
            max_tokens = payload.max_tokens,
            "Sending request to chat API"
        );

        let start = Instant::now();
        let result = self
            .client
            .post(&self.config.api_url)
            .headers(trace_headers(request_id))
            .bearer_auth(api_key.expose_secret())
            .json(&request)
            .send()
            .await;
        metrics::record_upstream_latency(start.elapsed(), result.is_ok());

        let response = result.map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = truncate_error_body(&response.text().await.unwrap_or_default());
            tracing::warn!(status, body = %body, "Chat API returned an error status");
            return Err(ProviderError::Api { status, body });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        if let Some(usage) = &completion.usage {
            metrics::record_tokens(&self.config.model, usage.prompt_tokens, usage.completion_tokens);
        }

        Ok(completion.into_content())
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }
}

fn truncate_error_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

// ============================================================================
// Chat Completion API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// `choices[0].message.content`, ignoring blank text.
    fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}
