use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;

/// Chat bodies are a few sentences; anything bigger is rejected early
const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Health routes
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check));

    // Chat routes
    let chat_routes = Router::new()
        .route("/chat/", post(handlers::chat::chat_handler))
        .route("/chat", post(handlers::chat::chat_handler))
        .route(
            "/chat/{conversation_id}/end",
            post(handlers::chat::end_session_handler),
        );

    Router::new()
        .merge(public_routes)
        .merge(chat_routes)
        .with_state(state)
        // CORS
        .layer(CorsLayer::permissive())
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CatchPanicLayer::new())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

/// Bind the configured address. `host` may be an IP address or a hostname.
pub async fn bind_listener(server: &ServerConfig) -> std::io::Result<TcpListener> {
    TcpListener::bind((server.host.as_str(), server.port)).await
}
