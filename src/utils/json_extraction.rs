//! JSON extraction utilities for parsing LLM responses.
//!
//! Models asked for strict JSON still wrap it in markdown fences or prepend
//! a sentence of prose. Parsing happens in two stages:
//! 1. Strip a surrounding code fence and parse the rest as a JSON object
//! 2. If that fails, hand the text to the salvage strategies in
//!    [`super::salvage`], which pull known fields out with regexes
//!
//! # Example
//!
//! ```
//! use innervoice::utils::json_extraction::{parse_structured, StructuredParse};
//!
//! let raw = "```json\n{\"quote\": \"Be bold\", \"author\": \"Seneca\"}\n```";
//! let parsed = parse_structured(raw);
//! assert!(matches!(parsed, StructuredParse::Parsed(_)));
//! assert_eq!(parsed.str_field("author"), Some("Seneca"));
//! ```

use serde_json::{Map, Value};

use super::salvage::{default_strategies, SalvageStrategy};

/// Result of a structured parse attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredParse {
    /// The text (minus fences) was a strict JSON object.
    Parsed(Map<String, Value>),
    /// Strict parsing failed; a salvage strategy recovered these fields.
    Salvaged {
        strategy: &'static str,
        fields: Map<String, Value>,
    },
    /// Nothing usable could be recovered.
    Unparseable,
}

impl StructuredParse {
    /// Recovered fields, whichever stage produced them.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        match self {
            StructuredParse::Parsed(fields) | StructuredParse::Salvaged { fields, .. } => {
                Some(fields)
            }
            StructuredParse::Unparseable => None,
        }
    }

    /// A string-typed field, if present.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields()?.get(key)?.as_str()
    }

    /// Returns true if nothing could be recovered.
    pub fn is_unparseable(&self) -> bool {
        matches!(self, StructuredParse::Unparseable)
    }
}

/// Remove a surrounding markdown code fence.
///
/// Strips a leading ```` ```json ```` (any case) or bare ```` ``` ```` and a
/// trailing ```` ``` ````, then trims. Text without fences is only trimmed.
pub fn strip_code_fence(content: &str) -> &str {
    let mut text = content.trim();

    if let Some(tag) = text.get(..7) {
        if tag.eq_ignore_ascii_case("```json") {
            text = &text[7..];
        }
    }
    if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// Parse model output into a field map using the default salvage strategies.
pub fn parse_structured(raw: &str) -> StructuredParse {
    parse_structured_with(raw, default_strategies())
}

/// Parse model output, falling back to the given salvage strategies in order.
pub fn parse_structured_with(raw: &str, strategies: &[&dyn SalvageStrategy]) -> StructuredParse {
    let cleaned = strip_code_fence(raw);

    match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Object(fields)) => return StructuredParse::Parsed(fields),
        Ok(other) => {
            tracing::debug!(kind = json_kind(&other), "Model output is JSON but not an object");
        }
        Err(err) => {
            tracing::debug!(error = %err, "Strict JSON parse failed, trying salvage");
        }
    }

    for strategy in strategies {
        if let Some(fields) = strategy.salvage(cleaned) {
            tracing::debug!(strategy = strategy.name(), "Salvaged model output");
            return StructuredParse::Salvaged {
                strategy: strategy.name(),
                fields,
            };
        }
    }

    StructuredParse::Unparseable
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fence() {
        let input = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fence(input), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_fence_case_insensitive_and_bare() {
        assert_eq!(strip_code_fence("```JSON {\"a\":1} ```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_without_fence_only_trims() {
        assert_eq!(strip_code_fence("  plain text \n"), "plain text");
        assert_eq!(strip_code_fence("short"), "short");
        assert_eq!(strip_code_fence(""), "");
    }

    #[test]
    fn test_strip_handles_multibyte_prefix() {
        assert_eq!(strip_code_fence("İç Sesin"), "İç Sesin");
    }

    #[test]
    fn test_parse_fenced_quote() {
        let raw = "```json\n{\"quote\":\"Be bold\",\"author\":\"Seneca\"}\n```";
        let parsed = parse_structured(raw);

        assert!(matches!(parsed, StructuredParse::Parsed(_)));
        assert_eq!(parsed.str_field("quote"), Some("Be bold"));
        assert_eq!(parsed.str_field("author"), Some("Seneca"));
    }

    #[test]
    fn test_parse_salvages_letter_after_prose() {
        let raw = r#"Here you go: {"letter": "Dear X,\nStay strong.\nYour Inner Voice"}"#;
        let parsed = parse_structured(raw);

        match &parsed {
            StructuredParse::Salvaged { strategy, .. } => assert_eq!(*strategy, "letter"),
            other => panic!("expected salvage, got {other:?}"),
        }
        assert_eq!(
            parsed.str_field("letter"),
            Some("Dear X,\nStay strong.\nYour Inner Voice")
        );
    }

    #[test]
    fn test_parse_non_object_json_is_salvaged_or_unparseable() {
        assert!(parse_structured("[1, 2, 3]").is_unparseable());
        assert!(parse_structured("\"just a string\"").is_unparseable());
    }

    #[test]
    fn test_parse_plain_prose_is_unparseable() {
        let parsed = parse_structured("The only way out is through. - Robert Frost");
        assert!(parsed.is_unparseable());
        assert_eq!(parsed.fields(), None);
        assert_eq!(parsed.str_field("quote"), None);
    }

    #[test]
    fn test_parse_with_no_strategies_gives_up() {
        let raw = r#"Sure! {"letter": "Hi"} hope that helps"#;
        assert!(parse_structured_with(raw, &[]).is_unparseable());
    }

    #[test]
    fn test_str_field_rejects_non_strings() {
        let parsed = parse_structured(r#"{"quote": 42, "author": null}"#);
        assert!(matches!(parsed, StructuredParse::Parsed(_)));
        assert_eq!(parsed.str_field("quote"), None);
        assert_eq!(parsed.str_field("author"), None);
    }
}
