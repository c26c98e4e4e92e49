//! Error types for innervoice operations.
//!
//! Defines the error types shared across the crate:
//! - LLM provider interactions (classified by failure mode)
//! - Caller input validation

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during LLM operations.
///
/// Provider failures are classified by HTTP status so the retry loop can
/// tell transient failures from ones that will never succeed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LlmError {
    #[error("Missing API key: OPENROUTER_API_KEY is not configured")]
    MissingApiKey,

    #[error("Authentication failed: {0}")]
    AuthenticationFailure(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Rate limited (retry after {retry_after_secs}s): {message}")]
    RateLimited {
        message: String,
        retry_after_secs: u64,
    },

    #[error("Service unavailable ({status}): {message}")]
    ServiceUnavailable { status: u16, message: String },

    #[error("API error ({status} {status_text}): {message}")]
    GenericFailure {
        status: u16,
        status_text: String,
        message: String,
    },

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),
}

impl LlmError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::MissingApiKey
            | LlmError::AuthenticationFailure(_)
            | LlmError::QuotaExceeded(_) => false,
            LlmError::RateLimited { .. }
            | LlmError::ServiceUnavailable { .. }
            | LlmError::GenericFailure { .. }
            | LlmError::RequestFailed(_)
            | LlmError::ParseError(_) => true,
        }
    }

    /// Whether the error must reach the user even in flows that otherwise
    /// degrade gracefully (chat). Retrying these is futile.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LlmError::MissingApiKey
                | LlmError::AuthenticationFailure(_)
                | LlmError::QuotaExceeded(_)
        )
    }

    /// Seconds the provider asked us to wait, for rate-limit errors.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            LlmError::RateLimited {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Field that failed validation (wire name, e.g. `customMood`).
    pub field: String,
    /// Description of the problem.
    pub message: String,
}

/// Caller input rejected before any outbound call is made.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid input: {}", summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Create an error with a single issue.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    /// Whether a given field is among the reported issues.
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.field, issue.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_retryable_kinds() {
        assert!(!LlmError::AuthenticationFailure("bad key".to_string()).is_retryable());
        assert!(!LlmError::QuotaExceeded("no credits".to_string()).is_retryable());
        assert!(!LlmError::MissingApiKey.is_retryable());
    }

    #[test]
    fn test_retryable_kinds() {
        let errors = [
            LlmError::RateLimited {
                message: "slow down".to_string(),
                retry_after_secs: 60,
            },
            LlmError::ServiceUnavailable {
                status: 503,
                message: "down".to_string(),
            },
            LlmError::GenericFailure {
                status: 418,
                status_text: "I'm a teapot".to_string(),
                message: "teapot".to_string(),
            },
            LlmError::RequestFailed("connection reset".to_string()),
        ];

        for error in errors {
            assert!(error.is_retryable(), "{error} should be retryable");
            assert!(!error.is_fatal());
        }
    }

    #[test]
    fn test_retry_after_only_for_rate_limit() {
        let limited = LlmError::RateLimited {
            message: "wait".to_string(),
            retry_after_secs: 5,
        };
        assert_eq!(limited.retry_after_secs(), Some(5));
        assert_eq!(
            LlmError::RequestFailed("x".to_string()).retry_after_secs(),
            None
        );
    }

    #[test]
    fn test_validation_error_display() {
        let error = ValidationError {
            issues: vec![
                FieldIssue {
                    field: "name".to_string(),
                    message: "Name is required".to_string(),
                },
                FieldIssue {
                    field: "customMood".to_string(),
                    message: "Please describe your mood".to_string(),
                },
            ],
        };

        assert_eq!(
            error.to_string(),
            "Invalid input: name: Name is required; customMood: Please describe your mood"
        );
        assert!(error.has_field("customMood"));
        assert!(!error.has_field("surname"));
    }
}
