//! LLM provider implementations.

pub mod openrouter;

pub use openrouter::{classify_failure, OpenRouterProvider, DEFAULT_RETRY_AFTER_SECS};

// Re-export the provider trait for convenience
pub use super::types::LlmProvider;
