// This is the entry point of the pet care AI service.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (external APIs)
// - `http/` = HTTP-specific adapters (routes, handlers)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Build the router and serve it

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "http/http_layer.rs"]
mod http;
#[path = "infra/infra_layer.rs"]
mod infra;

mod config;

use crate::config::AppConfig;
use crate::core::chat::ChatService;
use crate::core::moderation::{ContentClassifier, ModerationService};
use crate::http::{build_router, AppState};
use crate::infra::classifier::ZeroShotClient;
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env().context("Failed to read configuration")?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // The moderation strategy is decided here, once, and never revisited.

    let classifier: Option<Box<dyn ContentClassifier>> = match &config.classifier {
        Some(classifier_config) => match ZeroShotClient::new(
            classifier_config.endpoint.clone(),
            classifier_config.api_token.clone(),
            classifier_config.timeout,
        ) {
            Ok(client) => Some(Box::new(client) as Box<dyn ContentClassifier>),
            Err(e) => {
                tracing::warn!("Failed to build classifier client: {}", e);
                None
            }
        },
        None => None,
    };

    let moderation_service = Arc::new(ModerationService::initialize(classifier).await);
    let chat_service = Arc::new(ChatService::new());

    tracing::info!(
        strategy = %moderation_service.strategy(),
        "Moderation strategy selected"
    );

    let state = Arc::new(AppState {
        chat: chat_service,
        moderation: moderation_service,
    });

    // ========================================================================
    // HTTP SERVER
    // ========================================================================

    let app = build_router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "Pet care AI service listening");

    axum::serve(listener, app)
        .await
        .context("HTTP server stopped unexpectedly")?;

    Ok(())
}
