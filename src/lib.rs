//! innervoice: personalized inspirational quotes, comforting letters and
//! inner-voice chat backed by an OpenRouter-compatible LLM API.
//!
//! The crate renders prompts from a user profile, calls the model through a
//! retrying gateway, salvages structured results from imperfect model output,
//! and serves both flows over HTTP.

// Core modules
pub mod chat;
pub mod cli;
pub mod error;
pub mod i18n;
pub mod llm;
pub mod profile;
pub mod prompts;
pub mod response;
pub mod server;
pub mod service;
pub mod utils;

// Re-export commonly used types
pub use error::{FieldIssue, LlmError, ValidationError};
pub use i18n::Language;
pub use profile::{Mood, UserProfile};
pub use response::{GeneratedLetter, GeneratedQuote, InnerVoiceResponse};
pub use service::InnerVoiceService;
