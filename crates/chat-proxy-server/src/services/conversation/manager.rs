use std::time::Instant;
use tracing::{debug, info, warn};

use crate::models::chat::{ChatMessage, Role};
use crate::utils::error::ChatError;

use super::store::SessionStore;
use super::types::ModelConfig;

/// Trait for the completion provider
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a reply for the full ordered history, trimmed of surrounding whitespace.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        config: &ModelConfig,
    ) -> Result<String, ChatError>;

    /// Whether a credential is available to reach the provider.
    fn is_configured(&self) -> bool;
}

/// Runs chat turns against the session store and the completion provider.
pub struct ConversationManager {
    store: SessionStore,
    llm_provider: Box<dyn LlmProvider>,
    model_config: ModelConfig,
}

impl ConversationManager {
    pub fn new(
        store: SessionStore,
        llm_provider: Box<dyn LlmProvider>,
        model_config: ModelConfig,
    ) -> Self {
        Self {
            store,
            llm_provider,
            model_config,
        }
    }

    /// Handle one turn: append the incoming message, ask the provider for a
    /// reply and record it.
    ///
    /// The conversation stays locked for the whole turn, so turns within a
    /// session never interleave. On provider failure only the incoming
    /// message is kept.
    pub async fn handle_turn(
        &self,
        conversation_id: &str,
        role: Role,
        content: impl Into<String>,
    ) -> Result<String, ChatError> {
        let message = ChatMessage::new(role, content)?;
        let content_len = message.content().len();

        let conversation = self.store.get_or_create(conversation_id);
        let mut conversation = conversation.lock().await;

        if !conversation.is_active() {
            warn!(conversation_id, "Turn rejected: conversation has ended");
            return Err(ChatError::SessionEnded);
        }

        conversation.append(message);
        debug!(
            conversation_id,
            role = %role,
            content_len,
            history_len = conversation.history_len(),
            "Appended incoming message"
        );

        let start_time = Instant::now();
        let reply = match self
            .llm_provider
            .complete(conversation.messages(), &self.model_config)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    conversation_id,
                    elapsed_ms = start_time.elapsed().as_millis() as u64,
                    "Completion failed: {}",
                    e
                );
                return Err(e);
            }
        };

        let assistant = ChatMessage::assistant(reply).map_err(|_| ChatError::EmptyResponse)?;
        let reply = assistant.content().to_string();
        conversation.append(assistant);

        info!(
            conversation_id,
            reply_len = reply.len(),
            history_len = conversation.history_len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Turn completed"
        );

        Ok(reply)
    }

    /// Mark a conversation as ended. Returns false if it does not exist.
    pub async fn end_session(&self, conversation_id: &str) -> bool {
        let Some(conversation) = self.store.get(conversation_id) else {
            debug!(conversation_id, "End requested for unknown conversation");
            return false;
        };

        conversation.lock().await.mark_ended();
        info!(conversation_id, "Conversation ended");
        true
    }

    pub fn provider_configured(&self) -> bool {
        self.llm_provider.is_configured()
    }

    pub fn active_sessions(&self) -> usize {
        self.store.len()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }
}
