//! Mapping of service errors onto HTTP responses.
//!
//! Every failure leaves the server through [`ApiError`], which picks the
//! status code, attaches `Retry-After` for rate limits, and localizes the
//! user-facing message.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::{LlmError, ValidationError};
use crate::i18n::Language;

/// What went wrong.
#[derive(Debug)]
pub enum ApiErrorKind {
    /// Profile or request fields failed validation.
    Validation(ValidationError),
    /// The request body was malformed or missing required parts.
    BadRequest(String),
    /// The gateway failed (after retries, where applicable).
    Llm(LlmError),
}

/// An error response in the caller's language.
#[derive(Debug)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub language: Language,
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn validation(error: ValidationError, language: Language) -> Self {
        Self {
            kind: ApiErrorKind::Validation(error),
            language,
        }
    }

    pub fn bad_request(message: impl Into<String>, language: Language) -> Self {
        Self {
            kind: ApiErrorKind::BadRequest(message.into()),
            language,
        }
    }

    pub fn llm(error: LlmError, language: Language) -> Self {
        Self {
            kind: ApiErrorKind::Llm(error),
            language,
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match &self.kind {
            ApiErrorKind::Validation(_) | ApiErrorKind::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiErrorKind::Llm(err) => match err {
                LlmError::AuthenticationFailure(_) => StatusCode::UNAUTHORIZED,
                LlmError::QuotaExceeded(_) => StatusCode::PAYMENT_REQUIRED,
                LlmError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
                LlmError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                LlmError::MissingApiKey
                | LlmError::GenericFailure { .. }
                | LlmError::RequestFailed(_)
                | LlmError::ParseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Short label for the `error` field.
    ///
    /// Upstream failure kinds use fixed English labels; validation and
    /// configuration errors reuse the localized message table.
    fn label(&self) -> String {
        let messages = self.language.messages();
        match &self.kind {
            ApiErrorKind::Validation(_) => messages.invalid_input.to_string(),
            ApiErrorKind::BadRequest(message) => message.clone(),
            ApiErrorKind::Llm(err) => match err {
                LlmError::MissingApiKey => messages.missing_api_key.to_string(),
                LlmError::AuthenticationFailure(_) => "Authentication failed".to_string(),
                LlmError::QuotaExceeded(_) => "Quota exceeded".to_string(),
                LlmError::RateLimited { .. } => "Rate limit exceeded".to_string(),
                LlmError::ServiceUnavailable { .. } => "Service unavailable".to_string(),
                _ => messages.generic_error.to_string(),
            },
        }
    }

    /// Localized, human-readable message.
    fn user_message(&self) -> String {
        let messages = self.language.messages();
        match &self.kind {
            ApiErrorKind::Validation(err) => err.to_string(),
            ApiErrorKind::BadRequest(message) => message.clone(),
            ApiErrorKind::Llm(err) => match err {
                LlmError::MissingApiKey => messages.missing_api_key.to_string(),
                LlmError::AuthenticationFailure(_) => messages.authentication_error.to_string(),
                LlmError::QuotaExceeded(_) => messages.quota_exceeded_error.to_string(),
                LlmError::RateLimited { .. } => messages.rate_limited(err.retry_after_secs()),
                LlmError::ServiceUnavailable { .. } => {
                    messages.service_unavailable_error.to_string()
                }
                _ => messages.generic_error.to_string(),
            },
        }
    }

    fn retry_after_secs(&self) -> Option<u64> {
        match &self.kind {
            ApiErrorKind::Llm(err) => err.retry_after_secs(),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ApiErrorKind::Validation(err) => write!(f, "{err}"),
            ApiErrorKind::BadRequest(message) => write!(f, "Bad request: {message}"),
            ApiErrorKind::Llm(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let mut body = json!({
            "error": self.label(),
            "message": self.user_message(),
        });
        if let ApiErrorKind::Validation(err) = &self.kind {
            body["details"] = json!(err.issues);
        }
        let retry_after = self.retry_after_secs();
        if let Some(seconds) = retry_after {
            body["retryAfter"] = json!(seconds);
        }

        let mut response = (status, Json(body)).into_response();
        if let Some(seconds) = retry_after {
            if let Ok(value) = HeaderValue::from_str(&seconds.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}
