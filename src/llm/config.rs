//! Gateway configuration.
//!
//! Everything the gateway needs is carried in [`GatewayConfig`] and handed to
//! constructors explicitly. The CLI fills it from flags and environment
//! variables; tests build it directly to point at fake endpoints.

use std::time::Duration;

/// Default OpenRouter API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model for every task.
pub const DEFAULT_MODEL: &str = "anthropic/claude-3-haiku:beta";

/// Default public URL sent as `HTTP-Referer`.
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";

/// Title sent as `X-Title` for provider analytics.
pub const APP_TITLE: &str = "InnerVoice";

/// Maximum number of retry attempts for transient failures.
pub const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff in milliseconds.
pub const BASE_RETRY_DELAY_MS: u64 = 1000;

/// Upper bound of the random jitter added to each backoff, in milliseconds.
pub const MAX_JITTER_MS: u64 = 1000;

/// Request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Configuration for the LLM gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Bearer credential. `None` means the service is not configured.
    pub api_key: Option<String>,
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Model used for quote generation.
    pub quote_model: String,
    /// Model used for letter generation.
    pub letter_model: String,
    /// Model used for chat replies.
    pub chat_model: String,
    /// Public app URL, sent as the referer header.
    pub app_url: String,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Base delay of the exponential schedule.
    pub base_delay: Duration,
    /// Maximum random jitter added to each exponential delay.
    pub max_jitter: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            quote_model: DEFAULT_MODEL.to_string(),
            letter_model: DEFAULT_MODEL.to_string(),
            chat_model: DEFAULT_MODEL.to_string(),
            app_url: DEFAULT_APP_URL.to_string(),
            max_retries: MAX_RETRIES,
            base_delay: Duration::from_millis(BASE_RETRY_DELAY_MS),
            max_jitter: Duration::from_millis(MAX_JITTER_MS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    /// Create a default configuration with the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Whether a non-empty API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Full chat-completions endpoint URL.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// The API key masked for logging.
    pub fn api_key_masked(&self) -> String {
        match self.api_key.as_deref() {
            None => "<unset>".to_string(),
            Some(key) => {
                let len = key.chars().count();
                if len <= 8 {
                    return "*".repeat(len);
                }
                let head: String = key.chars().take(4).collect();
                let tail: String = key.chars().skip(len - 4).collect();
                format!("{head}...{tail}")
            }
        }
    }
}
