//! HTTP server exposing the generate and chat flows.

pub mod error;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::llm::{GatewayConfig, LlmGateway};
use crate::service::InnerVoiceService;

pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use handlers::{ChatRequest, ChatResponse, GenerateRequest};

/// Shared handler state.
///
/// `service` is `None` when no API key is configured; the server still
/// starts and every generation request answers with a configuration error.
#[derive(Clone, Default)]
pub struct AppState {
    service: Option<Arc<InnerVoiceService>>,
}

impl AppState {
    pub fn new(service: InnerVoiceService) -> Self {
        Self {
            service: Some(Arc::new(service)),
        }
    }

    /// State with no credentials.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Build the state from gateway configuration.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, crate::error::LlmError> {
        if !config.has_api_key() {
            tracing::warn!("OPENROUTER_API_KEY is not set, generation requests will fail");
            return Ok(Self::unconfigured());
        }
        let gateway = LlmGateway::from_config(config)?;
        Ok(Self::new(InnerVoiceService::new(gateway)))
    }

    pub fn service(&self) -> Option<&InnerVoiceService> {
        self.service.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.service.is_some()
    }
}

/// Build the router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/generate", post(handlers::generate_handler))
        .route("/api/chat", post(handlers::chat_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn run(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(address = %listener.local_addr()?, "InnerVoice server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_state() {
        let state = AppState::from_config(&GatewayConfig::default()).expect("state");
        assert!(!state.is_configured());
        assert!(state.service().is_none());
    }

    #[test]
    fn test_configured_state() {
        let state =
            AppState::from_config(&GatewayConfig::with_api_key("sk-or-test-key")).expect("state");
        assert!(state.is_configured());
    }
}
