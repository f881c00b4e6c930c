use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.deepseek.com/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Default)]
pub struct CommentConfig {
    pub common: core_config::Config,
    pub deepseek: DeepSeekConfig,
}

/// Chat-completion endpoint settings.
#[derive(Debug, Clone)]
pub struct DeepSeekConfig {
    /// Bearer credential. Absence is reported per request, not at startup.
    pub api_key: Option<Secret<String>>,
    pub api_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl DeepSeekConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }
}

impl CommentConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let timeout_secs = match optional_env("DEEPSEEK_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "DEEPSEEK_TIMEOUT_SECS must be a whole number of seconds: {}",
                    e
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(CommentConfig {
            common,
            deepseek: DeepSeekConfig {
                api_key: optional_env("DEEPSEEK_API_KEY")
                    .or_else(|| optional_env("AI_API_KEY"))
                    .map(Secret::new),
                api_url: optional_env("DEEPSEEK_API_URL")
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                model: optional_env("DEEPSEEK_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                timeout_secs,
            },
        })
    }
}

/// Environment variable value, treating empty strings as unset.
fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
