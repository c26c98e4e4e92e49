//! Generated results and their assembly from raw model text.
//!
//! Assembly never fails: when the model output cannot be parsed, the
//! fence-stripped text itself becomes the result.

use serde::{Deserialize, Serialize};

use crate::utils::json_extraction::{parse_structured, strip_code_fence};

/// Author shown when the model's quote could not be parsed.
pub const PLACEHOLDER_AUTHOR: &str = "Historical Figure";

/// An attributed inspirational quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuote {
    pub text: String,
    pub author: String,
}

/// A comforting letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedLetter {
    pub content: String,
}

/// Output of the one-shot generation flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerVoiceResponse {
    pub quote: GeneratedQuote,
    pub letter: GeneratedLetter,
}

/// Build a quote from raw model output.
pub fn assemble_quote(raw: &str) -> GeneratedQuote {
    let parsed = parse_structured(raw);

    if let (Some(text), Some(author)) = (parsed.str_field("quote"), parsed.str_field("author")) {
        return GeneratedQuote {
            text: text.to_string(),
            author: author.to_string(),
        };
    }

    tracing::warn!(
        preview = %preview(raw),
        "Quote response was not structured, using raw text"
    );
    GeneratedQuote {
        text: strip_code_fence(raw).to_string(),
        author: PLACEHOLDER_AUTHOR.to_string(),
    }
}

/// Build a letter from raw model output.
pub fn assemble_letter(raw: &str) -> GeneratedLetter {
    let parsed = parse_structured(raw);

    if let Some(letter) = parsed.str_field("letter") {
        return GeneratedLetter {
            content: letter.to_string(),
        };
    }

    tracing::warn!(
        preview = %preview(raw),
        "Letter response was not structured, using raw text"
    );
    GeneratedLetter {
        content: strip_code_fence(raw).to_string(),
    }
}

fn preview(raw: &str) -> String {
    raw.trim().chars().take(80).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_quote_from_fenced_json() {
        let quote = assemble_quote("```json\n{\"quote\":\"Be bold\",\"author\":\"Seneca\"}\n```");
        assert_eq!(
            quote,
            GeneratedQuote {
                text: "Be bold".to_string(),
                author: "Seneca".to_string(),
            }
        );
    }

    #[test]
    fn test_assemble_quote_falls_back_to_raw_text() {
        let quote = assemble_quote("  Keep your face always toward the sunshine.  ");
        assert_eq!(quote.text, "Keep your face always toward the sunshine.");
        assert_eq!(quote.author, PLACEHOLDER_AUTHOR);
    }

    #[test]
    fn test_assemble_quote_requires_string_author() {
        let raw = r#"{"quote": "Be kind", "author": 7}"#;
        let quote = assemble_quote(raw);
        assert_eq!(quote.author, PLACEHOLDER_AUTHOR);
        assert_eq!(quote.text, raw);
    }

    #[test]
    fn test_assemble_letter_from_salvage() {
        let letter =
            assemble_letter(r#"Here you go: {"letter": "Dear X,\nStay strong.\nYour Inner Voice"}"#);
        assert_eq!(letter.content, "Dear X,\nStay strong.\nYour Inner Voice");
    }

    #[test]
    fn test_assemble_letter_falls_back_verbatim() {
        let raw = "```\nDear Ada,\n\nYou are doing better than you think.\n```";
        let letter = assemble_letter(raw);
        assert_eq!(
            letter.content,
            "Dear Ada,\n\nYou are doing better than you think."
        );
    }

    #[test]
    fn test_response_serialization_shape() {
        let response = InnerVoiceResponse {
            quote: GeneratedQuote {
                text: "t".to_string(),
                author: "a".to_string(),
            },
            letter: GeneratedLetter {
                content: "c".to_string(),
            },
        };
        let json = serde_json::to_value(&response).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({"quote": {"text": "t", "author": "a"}, "letter": {"content": "c"}})
        );
    }
}
