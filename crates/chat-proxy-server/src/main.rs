use anyhow::{bail, Result};
use std::sync::Arc;
use tracing::{info, warn};

use chat_proxy_server::config::Settings;
use chat_proxy_server::router::{bind_listener, build_router};
use chat_proxy_server::services::conversation::SessionStore;
use chat_proxy_server::services::{ConversationManager, LlmService};
use chat_proxy_server::state::AppState;
use chat_proxy_server::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::load()?;

    // Initialize logging
    init_telemetry(&settings.logging);

    info!("🚀 Starting chat proxy server...");
    info!(
        "✅ Configuration loaded (model={}, max_history={})",
        settings.llm.model, settings.conversation.max_history
    );
    match &settings.config_file {
        Some(path) => info!("Settings file: {}", path.display()),
        None => warn!("No config/settings file in the working directory; using defaults and environment"),
    }

    if !settings.llm.has_api_key() {
        if settings.llm.require_api_key {
            bail!("No API key found for the completion provider. Set GROQ_API_KEY or APP__LLM__API_KEY.");
        }
        warn!("No API key found for the completion provider; chat requests will fail with 503");
    }

    // Initialize services
    let llm_service = LlmService::new(&settings.llm)?;
    let store = SessionStore::new(
        settings.prompts.system_prompt.clone(),
        settings.conversation.max_history,
    );
    let conversation_manager = Arc::new(ConversationManager::new(
        store,
        Box::new(llm_service),
        settings.llm.model_config(),
    ));

    // Build router
    let app = build_router(AppState::new(conversation_manager));

    // Start server
    let listener = bind_listener(&settings.server).await?;

    info!("🎯 Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
