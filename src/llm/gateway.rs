//! The LLM gateway: the single outbound integration point.
//!
//! Owns the provider, the per-task model identifiers and the retry policy.
//! Both completion paths run through [`RetryPolicy::run`].

use std::sync::Arc;

use crate::error::LlmError;
use crate::i18n::Language;
use crate::llm::config::GatewayConfig;
use crate::llm::providers::OpenRouterProvider;
use crate::llm::retry::RetryPolicy;
use crate::llm::types::{
    GenerationRequest, LlmProvider, Message, Sampling, CHAT_SAMPLING, GENERATION_SAMPLING,
};

/// Model identifiers per task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskModels {
    pub quote: String,
    pub letter: String,
    pub chat: String,
}

impl TaskModels {
    fn from_config(config: &GatewayConfig) -> Self {
        Self {
            quote: config.quote_model.clone(),
            letter: config.letter_model.clone(),
            chat: config.chat_model.clone(),
        }
    }
}

/// Gateway to the chat-completion provider.
#[derive(Clone)]
pub struct LlmGateway {
    provider: Arc<dyn LlmProvider>,
    models: TaskModels,
    retry: RetryPolicy,
}

impl LlmGateway {
    /// Build a gateway talking to OpenRouter with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::MissingApiKey` when no credential is configured.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, LlmError> {
        let provider = OpenRouterProvider::new(config)?;
        tracing::info!(
            url = provider.url(),
            api_key = %config.api_key_masked(),
            quote_model = %config.quote_model,
            letter_model = %config.letter_model,
            chat_model = %config.chat_model,
            "LLM gateway configured"
        );
        Ok(Self::with_provider(Arc::new(provider), config))
    }

    /// Build a gateway around any provider (fakes in tests, proxies).
    pub fn with_provider(provider: Arc<dyn LlmProvider>, config: &GatewayConfig) -> Self {
        Self {
            provider,
            models: TaskModels::from_config(config),
            retry: RetryPolicy::from_config(config),
        }
    }

    /// Replace the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Configured model identifiers.
    pub fn models(&self) -> &TaskModels {
        &self.models
    }

    /// One completion with `prompt` as the sole user message.
    pub async fn complete(&self, prompt: &str, model: &str) -> Result<String, LlmError> {
        let messages = vec![Message::user(prompt)];
        self.send(model, messages, GENERATION_SAMPLING).await
    }

    /// Chat completion over `[system, ...history, user]`.
    ///
    /// Failures degrade to the language's in-persona fallback sentence,
    /// except fatal ones (credentials, quota) which are returned.
    pub async fn complete_chat(
        &self,
        user_message: &str,
        system_prompt: &str,
        history: Vec<Message>,
        language: Language,
    ) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(system_prompt));
        messages.extend(history);
        messages.push(Message::user(user_message));

        match self.send(&self.models.chat, messages, CHAT_SAMPLING).await {
            Ok(reply) => Ok(reply),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    language = language.tag(),
                    "Chat completion failed, replying with fallback"
                );
                Ok(language.messages().chat_fallback.to_string())
            }
        }
    }

    async fn send(
        &self,
        model: &str,
        messages: Vec<Message>,
        sampling: Sampling,
    ) -> Result<String, LlmError> {
        let request = GenerationRequest::new(model, messages).with_sampling(sampling);

        self.retry
            .run(model, || {
                let request = request.clone();
                async move {
                    let response = self.provider.generate(request).await?;
                    Ok(response.first_content().unwrap_or_default().to_string())
                }
            })
            .await
    }
}
