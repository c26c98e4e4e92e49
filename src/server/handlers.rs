//! HTTP handlers for the generate and chat endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::chat::ChatMessage;
use crate::error::LlmError;
use crate::i18n::Language;
use crate::profile::UserProfile;
use crate::response::InnerVoiceResponse;

/// Body of `POST /api/generate`: the profile plus an optional language.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(default)]
    pub language: Option<String>,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user_context: Option<UserProfile>,
    #[serde(default)]
    pub message_history: Vec<ChatMessage>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Response of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Health check handler.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "configured": state.is_configured(),
    }))
}

/// One-shot generation of a quote and a letter.
pub async fn generate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Json<InnerVoiceResponse>> {
    let fallback_language = header_language(&headers);
    let Json(request) =
        payload.map_err(|rejection| ApiError::bad_request(rejection.body_text(), fallback_language))?;

    let language = request_language(request.language.as_deref(), fallback_language);
    request
        .profile
        .validate()
        .map_err(|err| ApiError::validation(err, language))?;

    let service = state
        .service()
        .ok_or_else(|| ApiError::llm(LlmError::MissingApiKey, language))?;

    let response = service
        .generate(&request.profile, language)
        .await
        .map_err(|err| ApiError::llm(err, language))?;

    Ok(Json(response))
}

/// One chat turn with the inner-voice persona.
pub async fn chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let fallback_language = header_language(&headers);
    let Json(request) =
        payload.map_err(|rejection| ApiError::bad_request(rejection.body_text(), fallback_language))?;

    let language = request_language(request.language.as_deref(), fallback_language);
    let profile = match request.user_context {
        Some(profile) if !request.message.trim().is_empty() => profile,
        _ => {
            return Err(ApiError::bad_request(
                "Message and user context are required",
                language,
            ))
        }
    };
    profile
        .validate()
        .map_err(|err| ApiError::validation(err, language))?;

    let service = state
        .service()
        .ok_or_else(|| ApiError::llm(LlmError::MissingApiKey, language))?;

    let reply = service
        .chat(&request.message, &profile, &request.message_history, language)
        .await
        .map_err(|err| ApiError::llm(err, language))?;

    Ok(Json(ChatResponse { response: reply }))
}

/// Language from the body tag, else the `Accept-Language` fallback.
fn request_language(tag: Option<&str>, fallback: Language) -> Language {
    match tag {
        Some(tag) if !tag.trim().is_empty() => Language::from_tag(Some(tag)),
        _ => fallback,
    }
}

/// First language listed in `Accept-Language`.
fn header_language(headers: &HeaderMap) -> Language {
    let first = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|tag| tag.split(';').next().unwrap_or(tag));
    Language::from_tag(first)
}
