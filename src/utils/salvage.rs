//! Regex salvage for near-JSON model output.
//!
//! Each strategy knows one response shape and either recovers all of its
//! fields or returns `None`. New shapes are added as new strategies; the
//! strict parse path in [`super::json_extraction`] does not change.

use regex::Regex;
use serde_json::{Map, Value};

/// Best-effort field extraction for one known response shape.
pub trait SalvageStrategy: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Recover the shape's fields from `text`, or give up with `None`.
    fn salvage(&self, text: &str) -> Option<Map<String, Value>>;
}

/// Recovers `{"quote": ..., "author": ...}`. Both fields are required.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteSalvage;

impl SalvageStrategy for QuoteSalvage {
    fn name(&self) -> &'static str {
        "quote"
    }

    fn salvage(&self, text: &str) -> Option<Map<String, Value>> {
        let quote = extract_string_field(text, "quote")?;
        let author = extract_string_field(text, "author")?;

        let mut fields = Map::new();
        fields.insert("quote".to_string(), Value::String(quote));
        fields.insert("author".to_string(), Value::String(author));
        Some(fields)
    }
}

/// Recovers `{"letter": ...}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LetterSalvage;

impl SalvageStrategy for LetterSalvage {
    fn name(&self) -> &'static str {
        "letter"
    }

    fn salvage(&self, text: &str) -> Option<Map<String, Value>> {
        let letter = extract_string_field(text, "letter")?;

        let mut fields = Map::new();
        fields.insert("letter".to_string(), Value::String(letter));
        Some(fields)
    }
}

static DEFAULT_STRATEGIES: [&dyn SalvageStrategy; 2] = [&QuoteSalvage, &LetterSalvage];

/// The built-in strategies, tried in this order.
pub fn default_strategies() -> &'static [&'static dyn SalvageStrategy] {
    &DEFAULT_STRATEGIES
}

/// Find `"key": "value"` and return the unescaped value.
///
/// The value pattern honours backslash escapes, so an escaped quote does
/// not end the match.
pub fn extract_string_field(text: &str, key: &str) -> Option<String> {
    let pattern = format!(r#"(?s)"{}"\s*:\s*"((?:[^"\\]|\\.)*)""#, regex::escape(key));
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(text)?;
    Some(unescape(caps.get(1)?.as_str()))
}

/// Undo the two escapes models commonly leave in salvaged text.
fn unescape(value: &str) -> String {
    value.replace("\\\"", "\"").replace("\\n", "\n")
}
