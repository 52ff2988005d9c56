use std::sync::Arc;
use axum::extract::FromRef;
use chrono::{DateTime, Utc};

use crate::services::ConversationManager;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub conversation_manager: Arc<ConversationManager>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(conversation_manager: Arc<ConversationManager>) -> Self {
        Self {
            conversation_manager,
            started_at: Utc::now(),
        }
    }
}

impl FromRef<AppState> for Arc<ConversationManager> {
    fn from_ref(state: &AppState) -> Self {
        state.conversation_manager.clone()
    }
}
