// Request handlers for the /api/ai routes.
//
// Handlers only translate between JSON and the core services; every decision
// lives in `core`.

use super::server::AppState;
use crate::core::chat::{ChatReply, ChatRequest};
use crate::core::moderation::{
    ModerationError, ModerationRequest, ModerationStrategy, ModerationVerdict,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Error returned to HTTP clients as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Moderation(#[from] ModerationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Moderation(ModerationError::Classifier(_)) => StatusCode::BAD_GATEWAY,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// POST /api/ai/chat -- pet-care advice
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatReply> {
    Json(state.chat.reply(&request))
}

/// POST /api/ai/moderate -- content moderation
pub async fn moderate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ModerationRequest>,
) -> Result<Json<ModerationVerdict>, ApiError> {
    match state.moderation.moderate(&request).await {
        Ok(verdict) => Ok(Json(verdict)),
        Err(e) => {
            tracing::error!("Moderation failed: {}", e);
            Err(e.into())
        }
    }
}

/// GET /api/ai/health -- liveness plus which moderation branch is active
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let strategy = state.moderation.strategy();

    Json(json!({
        "status": "healthy",
        "ai_models_loaded": strategy == ModerationStrategy::Classifier,
        "strategy": strategy,
    }))
}
