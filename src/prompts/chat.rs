//! Chat persona prompt and transcript replay.

use crate::chat::ChatMessage;
use crate::i18n::Language;
use crate::llm::Message;
use crate::profile::UserProfile;

/// System prompt establishing the inner-voice persona.
const CHAT_SYSTEM_PROMPT: &str = r#"You are {name}'s inner voice: the calm, kind part of them that listens and speaks honestly.

What you know about them:
- Name: {name}
- Age: about {age}
- Current mood: {mood}

How to talk:
- Speak as their inner voice, in the first person, warm and conversational.
- Keep replies short: a few sentences, like a real conversation.
- Be supportive and non-clinical. Do not diagnose, and do not present yourself as a therapist or a doctor.
- If they mention being in danger or wanting to hurt themselves, gently encourage them to reach out to someone they trust or to local emergency services.
- Always reply in {language}, in plain text without markdown."#;

/// Build the persona system prompt for a validated profile.
pub fn build_chat_system_prompt(profile: &UserProfile, language: Language) -> String {
    CHAT_SYSTEM_PROMPT
        .replace("{name}", profile.name.trim())
        .replace("{age}", &profile.age().to_string())
        .replace("{mood}", profile.effective_mood())
        .replace("{language}", language.english_name())
}

/// Replay a transcript as model messages.
///
/// Drops the synthetic welcome message and keeps everything else in order.
pub fn build_chat_history(transcript: &[ChatMessage]) -> Vec<Message> {
    transcript
        .iter()
        .filter(|message| !message.is_welcome())
        .map(|message| Message::from_role(message.role, message.content.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatRole;
    use crate::profile::Mood;
    use chrono::NaiveDate;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Sam".to_string(),
            surname: "Lee".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1988, 1, 1).expect("valid date"),
            mood: Mood::Other,
            custom_mood: Some("overwhelmed by work".to_string()),
        }
    }

    #[test]
    fn test_system_prompt_bakes_in_profile() {
        let prompt = build_chat_system_prompt(&profile(), Language::En);
        assert!(prompt.starts_with("You are Sam's inner voice"));
        assert!(prompt.contains("Current mood: overwhelmed by work"));
        assert!(prompt.contains("non-clinical"));
        assert!(prompt.contains("reply in English"));
        assert!(!prompt.contains("JSON"));
    }

    #[test]
    fn test_system_prompt_language() {
        let prompt = build_chat_system_prompt(&profile(), Language::Tr);
        assert!(prompt.contains("reply in Turkish"));
    }

    #[test]
    fn test_history_excludes_welcome_and_keeps_order() {
        let transcript = vec![
            ChatMessage::welcome(&profile(), Language::En),
            ChatMessage::new("user-1", ChatRole::User, "I can't sleep"),
            ChatMessage::new("assistant-1", ChatRole::Assistant, "What's on your mind?"),
            ChatMessage::new("user-2", ChatRole::User, "Deadlines"),
        ];

        let history = build_chat_history(&transcript);
        assert_eq!(
            history,
            vec![
                Message::user("I can't sleep"),
                Message::assistant("What's on your mind?"),
                Message::user("Deadlines"),
            ]
        );
    }

    #[test]
    fn test_history_welcome_only_by_id() {
        let transcript = vec![ChatMessage::new(
            "assistant-9",
            ChatRole::Assistant,
            "Hello Sam! I'm your Inner Voice",
        )];
        assert_eq!(build_chat_history(&transcript).len(), 1);
        assert!(build_chat_history(&[]).is_empty());
    }
}
