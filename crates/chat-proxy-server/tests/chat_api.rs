use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use chat_proxy_server::config::ServerConfig;
use chat_proxy_server::router::{bind_listener, build_router};
use chat_proxy_server::services::conversation::{
    ChatMessage, ConversationManager, LlmProvider, ModelConfig, Role, SessionStore,
};
use chat_proxy_server::state::AppState;
use chat_proxy_server::utils::error::ChatError;

const SYSTEM_PROMPT: &str = "You are Sabrang Assistant.";

/// Provider stub with a fixed outcome for every call.
struct StubProvider {
    outcome: Result<String, ChatError>,
    configured: bool,
}

#[async_trait::async_trait]
impl LlmProvider for StubProvider {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        _config: &ModelConfig,
    ) -> Result<String, ChatError> {
        self.outcome.clone()
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

fn setup(outcome: Result<String, ChatError>, configured: bool) -> (Router, Arc<ConversationManager>) {
    let manager = Arc::new(ConversationManager::new(
        SessionStore::new(SYSTEM_PROMPT, 10),
        Box::new(StubProvider { outcome, configured }),
        ModelConfig {
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 1.0,
            max_tokens: 512,
            top_p: 1.0,
        },
    ));
    (build_router(AppState::new(manager.clone())), manager)
}

fn replying(text: &str) -> (Router, Arc<ConversationManager>) {
    setup(Ok(text.to_string()), true)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn history(manager: &ConversationManager, id: &str) -> Vec<(Role, String)> {
    let conversation = manager.store().get(id).expect("conversation exists");
    let conversation = conversation.lock().await;
    conversation
        .messages()
        .iter()
        .map(|m| (m.role(), m.content().to_string()))
        .collect()
}

#[tokio::test]
async fn test_chat_returns_reply_and_records_turn() {
    let (app, manager) = replying("Sabrang is JKLU's annual fest.");

    let (status, body) = send(
        &app,
        "POST",
        "/chat/",
        Some(json!({"message": "What is Sabrang?", "role": "user", "conversation_id": "abc123"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"response": "Sabrang is JKLU's annual fest.", "conversation_id": "abc123"})
    );
    assert_eq!(
        history(&manager, "abc123").await,
        vec![
            (Role::System, SYSTEM_PROMPT.to_string()),
            (Role::User, "What is Sabrang?".to_string()),
            (Role::Assistant, "Sabrang is JKLU's annual fest.".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_role_defaults_to_user_and_path_without_slash() {
    let (app, manager) = replying("hello!");

    let (status, _) = send(
        &app,
        "POST",
        "/chat",
        Some(json!({"message": "hi", "conversation_id": "no-role"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(history(&manager, "no-role").await[1], (Role::User, "hi".to_string()));
}

#[tokio::test]
async fn test_turns_accumulate_in_same_conversation() {
    let (app, manager) = replying("ok");

    for message in ["first", "second"] {
        let (status, _) = send(
            &app,
            "POST",
            "/chat/",
            Some(json!({"message": message, "conversation_id": "repeat"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(history(&manager, "repeat").await.len(), 5);
    assert_eq!(manager.active_sessions(), 1);
}

#[tokio::test]
async fn test_invalid_requests_are_unprocessable() {
    let (app, manager) = replying("unused");

    let cases = [
        json!({"message": "hi", "conversation_id": "ab"}),
        json!({"message": "", "conversation_id": "valid-id"}),
        json!({"message": "   ", "conversation_id": "valid-id"}),
        json!({"message": "hi", "role": "moderator", "conversation_id": "valid-id"}),
    ];

    for case in cases {
        let (status, body) = send(&app, "POST", "/chat/", Some(case.clone())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "case: {}", case);
        assert_eq!(body["error"], "UnprocessableEntity");
    }

    assert_eq!(manager.active_sessions(), 0);
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let (app, _) = replying("unused");
    let (status, _) = send(&app, "POST", "/chat/", Some(json!({"message": "hi"}))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_not_configured_is_service_unavailable() {
    let (app, manager) = setup(Err(ChatError::NotConfigured), false);

    let (status, body) = send(
        &app,
        "POST",
        "/chat/",
        Some(json!({"message": "hi", "conversation_id": "no-key"})),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "ServiceUnavailable");
    assert_eq!(history(&manager, "no-key").await.len(), 2);
}

#[tokio::test]
async fn test_upstream_failures_are_internal_errors() {
    for error in [ChatError::EmptyResponse, ChatError::UpstreamFailure("timeout".to_string())] {
        let (app, manager) = setup(Err(error), true);

        let (status, body) = send(
            &app,
            "POST",
            "/chat/",
            Some(json!({"message": "hi", "conversation_id": "broken"})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "LlmError");
        assert_eq!(history(&manager, "broken").await.len(), 2);
    }
}

#[tokio::test]
async fn test_ended_session_rejects_turns() {
    let (app, manager) = replying("reply");

    send(
        &app,
        "POST",
        "/chat/",
        Some(json!({"message": "hi", "conversation_id": "ending"})),
    )
    .await;

    let (status, body) = send(&app, "POST", "/chat/ending/end", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"conversation_id": "ending", "active": false}));

    let before = history(&manager, "ending").await;
    let (status, body) = send(
        &app,
        "POST",
        "/chat/",
        Some(json!({"message": "again", "conversation_id": "ending"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("session has ended"));
    assert_eq!(history(&manager, "ending").await, before);
}

#[tokio::test]
async fn test_end_unknown_session_is_not_found() {
    let (app, manager) = replying("reply");
    let (status, body) = send(&app, "POST", "/chat/ghost/end", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFound");
    assert_eq!(manager.active_sessions(), 0);
}

#[tokio::test]
async fn test_health_reports_configuration() {
    let (app, _) = replying("reply");
    send(
        &app,
        "POST",
        "/chat/",
        Some(json!({"message": "hi", "conversation_id": "health-1"})),
    )
    .await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["api_key_configured"], true);
    assert_eq!(body["active_sessions"], 1);

    let (status, _) = send(&app, "GET", "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_without_credential() {
    let (app, _) = setup(Err(ChatError::NotConfigured), false);

    let (_, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(body["api_key_configured"], false);

    let (status, _) = send(&app, "GET", "/health/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_bind_listener_accepts_hostname() {
    let server = ServerConfig {
        host: "localhost".to_string(),
        port: 0,
    };
    let listener = bind_listener(&server).await.unwrap();
    assert!(listener.local_addr().unwrap().ip().is_loopback());
}

#[tokio::test]
async fn test_error_body_names_the_failure() {
    let (app, _) = setup(Err(ChatError::EmptyResponse), true);
    let (status, body) = send(
        &app,
        "POST",
        "/chat/",
        Some(json!({"message": "hi", "conversation_id": "err-body"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "LlmError");
    assert!(body["message"].as_str().unwrap().contains("Empty response"));
}
