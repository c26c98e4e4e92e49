//! CLI definition for the innervoice server.
//!
//! Every flag falls back to an environment variable, so the binary runs
//! unchanged from a `.env`-style deployment.

use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use tracing::info;

use crate::llm::config::{DEFAULT_APP_URL, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::llm::GatewayConfig;
use crate::server::{self, AppState};

/// Default bind host.
const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port.
const DEFAULT_PORT: u16 = 3000;

/// Personalized quote, letter and chat companion served over HTTP.
#[derive(Parser, Debug)]
#[command(name = "innervoice")]
#[command(about = "Serve personalized inspirational quotes, letters and inner-voice chat")]
#[command(version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Address to bind.
    #[arg(long, env = "INNERVOICE_HOST", default_value = DEFAULT_HOST)]
    pub host: IpAddr,

    /// Port to bind.
    #[arg(short, long, env = "INNERVOICE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// OpenRouter API key.
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OpenRouter-compatible API base URL.
    #[arg(long, env = "OPENROUTER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Model for quote generation.
    #[arg(long, env = "OPENROUTER_MODEL_QUOTE", default_value = DEFAULT_MODEL)]
    pub quote_model: String,

    /// Model for letter generation.
    #[arg(long, env = "OPENROUTER_MODEL_LETTER", default_value = DEFAULT_MODEL)]
    pub letter_model: String,

    /// Model for chat replies. Defaults to the letter model.
    #[arg(long, env = "OPENROUTER_MODEL_CHAT")]
    pub chat_model: Option<String>,

    /// Public app URL sent as the HTTP-Referer header.
    #[arg(long, env = "APP_URL", default_value = DEFAULT_APP_URL)]
    pub app_url: String,
}

impl Cli {
    /// Gateway configuration from the parsed flags.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            api_key: self
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string),
            base_url: self.base_url.clone(),
            quote_model: self.quote_model.clone(),
            letter_model: self.letter_model.clone(),
            chat_model: self
                .chat_model
                .clone()
                .unwrap_or_else(|| self.letter_model.clone()),
            app_url: self.app_url.clone(),
            ..GatewayConfig::default()
        }
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse CLI arguments and return the Cli struct.
///
/// This allows main.rs to read `log_level` before starting the server.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Parse arguments and run.
pub async fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli()).await
}

/// Start the server with the parsed arguments.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let config = cli.gateway_config();

    info!(
        quote_model = %config.quote_model,
        letter_model = %config.letter_model,
        chat_model = %config.chat_model,
        base_url = %config.base_url,
        "Starting innervoice"
    );

    let state = AppState::from_config(&config)?;
    server::run(cli.bind_addr(), state).await?;
    Ok(())
}
