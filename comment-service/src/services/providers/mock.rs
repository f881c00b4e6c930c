//! Mock provider for testing.

use super::{ChatProvider, ProviderError};
use crate::models::PromptPayload;
use async_trait::async_trait;
use std::sync::Mutex;

/// Records every payload and answers with a canned reply.
pub struct MockChatProvider {
    reply: Option<String>,
    configured: bool,
    calls: Mutex<Vec<PromptPayload>>,
}

impl MockChatProvider {
    /// Answers every request with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            configured: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers successfully but without any content.
    pub fn empty() -> Self {
        Self {
            reply: None,
            configured: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Behaves like a provider with no API key.
    pub fn unconfigured() -> Self {
        Self {
            reply: None,
            configured: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Payloads received so far, in order.
    pub fn calls(&self) -> Vec<PromptPayload> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(
        &self,
        payload: &PromptPayload,
        _request_id: Option<&str>,
    ) -> Result<Option<String>, ProviderError> {
        if !self.configured {
            return Err(ProviderError::NotConfigured(
                "chat API key is not configured".to_string(),
            ));
        }

        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(payload.clone());

        Ok(self.reply.clone())
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}
