// Router construction and shared state for the HTTP layer.

use super::handlers;
use crate::core::chat::ChatService;
use crate::core::moderation::{ContentClassifier, ModerationService};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Services shared by every handler.
pub struct AppState {
    pub chat: Arc<ChatService>,
    pub moderation: Arc<ModerationService<Box<dyn ContentClassifier>>>,
}

/// Build the router with all endpoints.
pub fn build_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/api/ai/chat", post(handlers::chat))
        .route("/api/ai/moderate", post(handlers::moderate))
        .route("/api/ai/health", get(handlers::health))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the listed origins, with credentials.
///
/// Credentials rule out wildcards, so methods and headers are mirrored
/// from the preflight request instead.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
