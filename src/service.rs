//! The inner-voice flows: one-shot generation and follow-up chat.
//!
//! Callers validate the profile first; these flows assume valid input.

use crate::chat::ChatMessage;
use crate::error::LlmError;
use crate::i18n::Language;
use crate::llm::LlmGateway;
use crate::profile::UserProfile;
use crate::prompts::{
    build_chat_history, build_chat_system_prompt, build_letter_prompt, build_quote_prompt,
};
use crate::response::{assemble_letter, assemble_quote, InnerVoiceResponse};

/// Runs the generate and chat flows against the gateway.
#[derive(Clone)]
pub struct InnerVoiceService {
    gateway: LlmGateway,
}

impl InnerVoiceService {
    pub fn new(gateway: LlmGateway) -> Self {
        Self { gateway }
    }

    /// Generate a quote and a letter.
    ///
    /// Both requests are in flight at once. If either fails the whole call
    /// fails and the other result is discarded.
    pub async fn generate(
        &self,
        profile: &UserProfile,
        language: Language,
    ) -> Result<InnerVoiceResponse, LlmError> {
        let models = self.gateway.models();
        let quote_prompt = build_quote_prompt(profile, language);
        let letter_prompt = build_letter_prompt(profile, language);

        tracing::info!(
            language = language.tag(),
            mood = profile.mood.as_str(),
            "Generating inner voice response"
        );

        let (quote_raw, letter_raw) = tokio::try_join!(
            self.gateway.complete(&quote_prompt, &models.quote),
            self.gateway.complete(&letter_prompt, &models.letter),
        )?;

        Ok(InnerVoiceResponse {
            quote: assemble_quote(&quote_raw),
            letter: assemble_letter(&letter_raw),
        })
    }

    /// Reply to one chat message in the inner-voice persona.
    pub async fn chat(
        &self,
        message: &str,
        profile: &UserProfile,
        transcript: &[ChatMessage],
        language: Language,
    ) -> Result<String, LlmError> {
        let system_prompt = build_chat_system_prompt(profile, language);
        let history = build_chat_history(transcript);

        tracing::debug!(
            history_len = history.len(),
            language = language.tag(),
            "Sending chat message"
        );

        self.gateway
            .complete_chat(message.trim(), &system_prompt, history, language)
            .await
    }

    /// The greeting a client shows when a chat opens.
    pub fn welcome(&self, profile: &UserProfile, language: Language) -> ChatMessage {
        ChatMessage::welcome(profile, language)
    }
}
