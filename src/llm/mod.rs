//! LLM integration for innervoice.
//!
//! The gateway is the only component that talks to the model provider. It
//! classifies provider failures into [`LlmError`](crate::error::LlmError)
//! kinds and retries transient ones with exponential backoff.
//!
//! ```ignore
//! use innervoice::llm::{GatewayConfig, LlmGateway};
//!
//! let config = GatewayConfig::with_api_key(std::env::var("OPENROUTER_API_KEY")?);
//! let gateway = LlmGateway::from_config(&config)?;
//! let text = gateway.complete("Say hello", &config.quote_model).await?;
//! ```
//!
//! # Retry policy
//!
//! Up to three retries follow the first attempt. Authentication and quota
//! failures are returned immediately. A rate-limit response carrying
//! `Retry-After` waits exactly that long instead of the exponential delay.

pub mod config;
pub mod gateway;
pub mod providers;
pub mod retry;
pub mod types;

pub use config::GatewayConfig;
pub use gateway::{LlmGateway, TaskModels};
pub use providers::OpenRouterProvider;
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
pub use types::{
    Choice, GenerationRequest, GenerationResponse, LlmProvider, Message, Sampling, Usage,
    CHAT_SAMPLING, GENERATION_SAMPLING,
};
