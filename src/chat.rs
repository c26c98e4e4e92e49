//! Chat transcript types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::i18n::Language;
use crate::profile::UserProfile;

/// Id of the synthetic greeting that opens every transcript.
pub const WELCOME_MESSAGE_ID: &str = "welcome";

/// Which side of the conversation a message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Role name as the chat-completion API expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One entry of a chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Opaque id, unique within a session.
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message stamped with the current time.
    pub fn new(id: impl Into<String>, role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// The localized greeting shown when a chat opens.
    pub fn welcome(profile: &UserProfile, language: Language) -> Self {
        let content = language
            .messages()
            .chat_welcome
            .replace("{name}", profile.name.trim())
            .replace("{mood}", profile.localized_mood(language));

        Self::new(WELCOME_MESSAGE_ID, ChatRole::Assistant, content)
    }

    /// Whether this is the synthetic greeting.
    pub fn is_welcome(&self) -> bool {
        self.id == WELCOME_MESSAGE_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Mood;
    use chrono::NaiveDate;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Deniz".to_string(),
            surname: "Kaya".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1995, 3, 1).expect("valid date"),
            mood: Mood::Anxious,
            custom_mood: None,
        }
    }

    #[test]
    fn test_welcome_message_english() {
        let msg = ChatMessage::welcome(&profile(), Language::En);
        assert!(msg.is_welcome());
        assert_eq!(msg.role, ChatRole::Assistant);
        assert!(msg.content.starts_with("Hello Deniz!"));
        assert!(msg.content.contains("feeling anxious today"));
    }

    #[test]
    fn test_welcome_message_turkish_uses_localized_mood() {
        let msg = ChatMessage::welcome(&profile(), Language::Tr);
        assert!(msg.content.starts_with("Merhaba Deniz!"));
        assert!(msg.content.contains("endişeli"));
    }

    #[test]
    fn test_deserialize_without_timestamp() {
        let json = r#"{"id":"user-1","role":"user","content":"hi"}"#;
        let msg: ChatMessage = serde_json::from_str(json).expect("valid message");
        assert_eq!(msg.role, ChatRole::User);
        assert!(!msg.is_welcome());
    }

    #[test]
    fn test_deserialize_iso_timestamp() {
        let json = r#"{"id":"a-1","role":"assistant","content":"hey","timestamp":"2024-05-01T10:00:00.000Z"}"#;
        let msg: ChatMessage = serde_json::from_str(json).expect("valid message");
        assert_eq!(msg.timestamp.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }
}
