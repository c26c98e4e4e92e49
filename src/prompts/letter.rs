//! Prompt for the comforting letter.

use crate::i18n::Language;
use crate::profile::UserProfile;

/// Template for the letter request.
const LETTER_PROMPT: &str = r#"Write a personalized, comforting letter for {name}, who is approximately {age} years old and is currently feeling {mood}.

The letter should be:
- Warm and empathetic
- Personally addressing their current emotional state
- Offering genuine comfort and encouragement
- 2-3 paragraphs long
- Written in {language}, in a caring, supportive tone
- Signed "{signature}"

Make the letter feel personal and heartfelt, as if written by a caring friend who truly understands their situation.

Respond with a strict JSON object and nothing else, no prose and no markdown. Encode line breaks inside the letter as \n:
{"letter": "The complete letter content"}"#;

/// Build the letter prompt for a validated profile.
///
/// The age is derived from the birth year at call time.
pub fn build_letter_prompt(profile: &UserProfile, language: Language) -> String {
    LETTER_PROMPT
        .replace("{name}", profile.name.trim())
        .replace("{age}", &profile.age().to_string())
        .replace("{mood}", profile.effective_mood())
        .replace("{language}", language.english_name())
        .replace("{signature}", language.messages().persona_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Mood;
    use chrono::{Datelike, NaiveDate, Utc};

    fn profile() -> UserProfile {
        UserProfile {
            name: "Elif".to_string(),
            surname: "Şafak".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 12, 31).expect("valid date"),
            mood: Mood::Lonely,
            custom_mood: None,
        }
    }

    #[test]
    fn test_letter_prompt_contents() {
        let prompt = build_letter_prompt(&profile(), Language::En);
        let age = Utc::now().year() - 2000;

        assert!(prompt.contains("letter for Elif,"));
        assert!(prompt.contains(&format!("approximately {age} years old")));
        assert!(prompt.contains("feeling lonely"));
        assert!(prompt.contains("2-3 paragraphs"));
        assert!(prompt.contains("Signed \"Your Inner Voice\""));
        assert!(prompt.contains(r#"{"letter": "#));
    }

    #[test]
    fn test_letter_prompt_turkish_signature() {
        let prompt = build_letter_prompt(&profile(), Language::Tr);
        assert!(prompt.contains("Written in Turkish"));
        assert!(prompt.contains("Signed \"İç Sesin\""));
    }

    #[test]
    fn test_letter_prompt_omits_surname() {
        let prompt = build_letter_prompt(&profile(), Language::En);
        assert!(!prompt.contains("Şafak"));
    }
}
