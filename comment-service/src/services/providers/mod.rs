//! Chat-completion provider abstraction and implementations.
//!
//! The comment handler talks to a [`ChatProvider`]; production uses the
//! DeepSeek (OpenAI-compatible) client, tests use the mock.

pub mod deepseek;
pub mod mock;

use crate::models::PromptPayload;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Chat API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response from chat API: {0}")]
    InvalidResponse(String),
}

/// Trait for chat-completion backends.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send one completion request.
    ///
    /// `Ok(None)` means the API answered but produced no usable text.
    async fn complete(
        &self,
        payload: &PromptPayload,
        request_id: Option<&str>,
    ) -> Result<Option<String>, ProviderError>;

    /// Whether a credential is available. No network traffic.
    fn is_configured(&self) -> bool;
}
