//! Prompt builders for the inner-voice flows.
//!
//! Every builder is a pure function of a validated
//! [`UserProfile`](crate::profile::UserProfile) and a
//! [`Language`](crate::i18n::Language); none of them can fail.
//!
//! - [`quote`] - inspirational quote, strict `{"quote", "author"}` JSON
//! - [`letter`] - comforting letter, strict `{"letter"}` JSON
//! - [`chat`] - persona system prompt and transcript replay
//!
//! ```no_run
//! use innervoice::i18n::Language;
//! use innervoice::profile::{Mood, UserProfile};
//! use innervoice::prompts::{build_letter_prompt, build_quote_prompt};
//!
//! let profile = UserProfile {
//!     name: "Ada".to_string(),
//!     surname: "Lovelace".to_string(),
//!     date_of_birth: chrono::NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
//!     mood: Mood::Hopeful,
//!     custom_mood: None,
//! };
//!
//! let quote = build_quote_prompt(&profile, Language::En);
//! let letter = build_letter_prompt(&profile, Language::Tr);
//! ```

pub mod chat;
pub mod letter;
pub mod quote;

pub use chat::{build_chat_history, build_chat_system_prompt};
pub use letter::build_letter_prompt;
pub use quote::build_quote_prompt;
