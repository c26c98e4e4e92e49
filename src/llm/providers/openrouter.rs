//! OpenRouter provider implementation.
//!
//! OpenRouter exposes an OpenAI-compatible chat-completions endpoint. This
//! provider performs a single attempt per call and turns every non-2xx
//! response into a classified [`LlmError`]; the gateway decides whether to
//! retry.

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::llm::config::{GatewayConfig, APP_TITLE};
use crate::llm::{Choice, GenerationRequest, GenerationResponse, LlmProvider, Message, Usage};

/// Wait assumed when a 429 carries no usable `Retry-After` header.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// OpenRouter provider for LLM requests.
pub struct OpenRouterProvider {
    /// HTTP client for making API requests.
    client: Client,
    /// API key for OpenRouter authentication.
    api_key: String,
    /// Full chat-completions URL.
    url: String,
    /// Public app URL sent as the referer.
    app_url: String,
}

impl OpenRouterProvider {
    /// Create a provider from gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::MissingApiKey` if no API key is configured, or
    /// `LlmError::RequestFailed` if the HTTP client cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self, LlmError> {
        let api_key = match config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key.trim().to_string(),
            _ => return Err(LlmError::MissingApiKey),
        };

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| LlmError::RequestFailed(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            url: config.completions_url(),
            app_url: config.app_url.clone(),
        })
    }

    /// Get the completions URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        let api_request = ApiRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let http_response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.app_url)
            .header("X-Title", APP_TITLE)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = http_response.status();

        if !status.is_success() {
            let retry_after = http_response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let error_text = http_response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());

            let error = classify_failure(status, &error_text, retry_after.as_deref());
            tracing::debug!(
                status = status.as_u16(),
                error = %error,
                "OpenRouter request failed"
            );
            return Err(error);
        }

        let api_response: ApiResponse = http_response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(format!("Failed to parse API response: {e}")))?;

        let choices = api_response
            .choices
            .into_iter()
            .map(|choice| Choice {
                index: choice.index,
                message: Message {
                    role: choice.message.role,
                    content: choice.message.content.unwrap_or_default(),
                },
                finish_reason: choice.finish_reason,
            })
            .collect();

        Ok(GenerationResponse {
            id: api_response.id,
            model: api_response.model,
            choices,
            usage: api_response.usage.map(|usage| Usage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            }),
        })
    }
}

/// Map a non-2xx response to an error kind.
///
/// Total over all statuses: anything not explicitly listed falls into the
/// retryable `GenericFailure`.
pub fn classify_failure(status: StatusCode, body: &str, retry_after: Option<&str>) -> LlmError {
    let provider_message = provider_error_message(body);

    match status.as_u16() {
        401 => LlmError::AuthenticationFailure(
            provider_message.unwrap_or_else(|| "Invalid API key".to_string()),
        ),
        402 => LlmError::QuotaExceeded(
            provider_message.unwrap_or_else(|| "Insufficient credits".to_string()),
        ),
        429 => LlmError::RateLimited {
            message: provider_message.unwrap_or_else(|| "Too many requests".to_string()),
            retry_after_secs: parse_retry_after(retry_after),
        },
        code @ (500 | 502 | 503 | 504) => LlmError::ServiceUnavailable {
            status: code,
            message: provider_message
                .unwrap_or_else(|| "Service temporarily unavailable".to_string()),
        },
        code => LlmError::GenericFailure {
            status: code,
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: provider_message.unwrap_or_else(|| body.trim().to_string()),
        },
    }
}

/// Seconds from a `Retry-After` header; only the delta-seconds form is used.
fn parse_retry_after(value: Option<&str>) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Extract `error.message` from a structured provider error body.
fn provider_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .map(|response| response.error.message)
        .filter(|message| !message.trim().is_empty())
}

/// Internal request structure for the OpenRouter API.
#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Internal response structure from the OpenRouter API.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    id: Option<String>,
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

/// Internal choice structure from the API response.
#[derive(Debug, Deserialize)]
struct ApiChoice {
    #[serde(default)]
    index: u32,
    message: ApiMessage,
    finish_reason: Option<String>,
}

/// Internal message structure from the API response.
#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default = "assistant_role")]
    role: String,
    content: Option<String>,
}

fn assistant_role() -> String {
    "assistant".to_string()
}

/// Internal usage structure from the API response.
#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Error response from the API.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

/// Error detail from the API.
#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}
