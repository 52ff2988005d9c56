use crate::models::chat::*;
use crate::services::ConversationManager;
use crate::utils::error::ApiError;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub async fn chat_handler(
    State(manager): State<Arc<ConversationManager>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    request.validate()?;
    let role: Role = request.role.parse()?;

    info!(
        "Chat request: conversation={}, role={}, message_len={}",
        request.conversation_id,
        role,
        request.message.len()
    );

    let response = manager
        .handle_turn(&request.conversation_id, role, request.message)
        .await?;

    Ok(Json(ChatResponse {
        response,
        conversation_id: request.conversation_id,
    }))
}

pub async fn end_session_handler(
    State(manager): State<Arc<ConversationManager>>,
    Path(conversation_id): Path<String>,
) -> Result<Json<EndSessionResponse>, ApiError> {
    if !manager.end_session(&conversation_id).await {
        return Err(ApiError::NotFound(format!(
            "Conversation {} does not exist",
            conversation_id
        )));
    }

    Ok(Json(EndSessionResponse {
        conversation_id,
        active: false,
    }))
}
