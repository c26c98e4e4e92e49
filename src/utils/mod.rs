//! Shared utility functions for innervoice.
//!
//! This module provides parsing helpers for LLM responses: fence stripping,
//! strict JSON parsing and regex salvage.

pub mod json_extraction;
pub mod salvage;

pub use json_extraction::{parse_structured, parse_structured_with, strip_code_fence, StructuredParse};
pub use salvage::{default_strategies, extract_string_field, LetterSalvage, QuoteSalvage, SalvageStrategy};
