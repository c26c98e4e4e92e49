//! Prompt for the inspirational quote.

use crate::i18n::Language;
use crate::profile::UserProfile;

/// Template for the quote request.
const QUOTE_PROMPT: &str = r#"Generate an inspirational quote from a well-known historical figure that would be appropriate for someone named {full_name}, who is feeling {mood}.

Requirements:
- The quote must be genuine and historically accurate, attributed to the person who actually said or wrote it.
- It should address the person's current mood in a comforting and inspiring way.
- Write the quote in {language}. If the original was in another language, give a faithful {language} translation.

Respond with a single-line strict JSON object and nothing else, no prose and no markdown:
{"quote": "The quote text", "author": "Name of the historical figure"}"#;

/// Build the quote prompt for a validated profile.
pub fn build_quote_prompt(profile: &UserProfile, language: Language) -> String {
    QUOTE_PROMPT
        .replace("{full_name}", &profile.full_name())
        .replace("{mood}", profile.effective_mood())
        .replace("{language}", language.english_name())
}
