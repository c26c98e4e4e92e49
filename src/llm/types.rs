//! Chat-completion request/response types and the provider trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::chat::ChatRole;
use crate::error::LlmError;

/// A message in a conversation with an LLM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender ("system", "user" or "assistant").
    pub role: String,
    /// Content of the message.
    pub content: String,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    /// Create a message for a transcript role.
    pub fn from_role(role: ChatRole, content: impl Into<String>) -> Self {
        match role {
            ChatRole::User => Self::user(content),
            ChatRole::Assistant => Self::assistant(content),
        }
    }
}

/// Request for text generation from an LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model identifier to use for generation.
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<Message>,
    /// Sampling temperature (0.0 - 2.0). Higher values = more random.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl GenerationRequest {
    /// Create a new generation request with default parameters.
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the temperature for this request.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the max tokens for this request.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Apply a fixed sampling profile.
    pub fn with_sampling(self, sampling: Sampling) -> Self {
        self.with_temperature(sampling.temperature)
            .with_max_tokens(sampling.max_tokens)
    }
}

/// Fixed sampling parameters for one kind of task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Sampling for quote and letter generation.
pub const GENERATION_SAMPLING: Sampling = Sampling {
    temperature: 0.7,
    max_tokens: 1000,
};

/// Sampling for chat replies: a little more varied.
pub const CHAT_SAMPLING: Sampling = Sampling {
    temperature: 0.8,
    max_tokens: 1000,
};

/// Response from an LLM generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Unique identifier for this response, when the provider sends one.
    pub id: Option<String>,
    /// Model that generated this response.
    pub model: Option<String>,
    /// Generated choices/completions.
    pub choices: Vec<Choice>,
    /// Token usage statistics.
    pub usage: Option<Usage>,
}

impl GenerationResponse {
    /// Get the content of the first choice, if available.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }

    /// Build a single-choice response, mostly useful for fakes in tests.
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            id: None,
            model: None,
            choices: vec![Choice {
                index: 0,
                message: Message::assistant(content),
                finish_reason: Some("stop".to_string()),
            }],
            usage: None,
        }
    }
}

/// A single generated choice from the LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Index of this choice in the response.
    pub index: u32,
    /// Generated message.
    pub message: Message,
    /// Reason the generation stopped (e.g., "stop", "length").
    pub finish_reason: Option<String>,
}

/// Token usage statistics for a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Trait for LLM providers that can generate text.
///
/// Implementations perform exactly one attempt; retrying belongs to the
/// gateway.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a response for the given request.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError>;
}
