use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::types::Conversation;

/// Handle to a conversation owned by the store.
///
/// The mutex serializes turns within a single session; it may be held
/// across the completion call without blocking other sessions.
pub type SharedConversation = Arc<Mutex<Conversation>>;

/// Thread-safe in-memory session store.
/// Uses DashMap so lookups for unrelated sessions never contend on one lock.
#[derive(Clone)]
pub struct SessionStore {
    /// Session storage: conversation_id -> Conversation
    sessions: Arc<DashMap<String, SharedConversation>>,

    /// Seed for every new conversation
    system_prompt: Arc<str>,
    max_history: usize,
}

impl SessionStore {
    pub fn new(system_prompt: impl Into<String>, max_history: usize) -> Self {
        let system_prompt: String = system_prompt.into();
        info!("Initializing session store (max_history={})", max_history);
        Self {
            sessions: Arc::new(DashMap::new()),
            system_prompt: Arc::from(system_prompt),
            max_history,
        }
    }

    /// Return the conversation for `conversation_id`, creating it on first use.
    ///
    /// Creation happens under the shard's write lock, so concurrent callers
    /// for the same unseen id all receive the same instance.
    pub fn get_or_create(&self, conversation_id: &str) -> SharedConversation {
        if let Some(existing) = self.get(conversation_id) {
            return existing;
        }

        self.sessions
            .entry(conversation_id.to_string())
            .or_insert_with(|| {
                info!(conversation_id, "Creating new conversation");
                Arc::new(Mutex::new(Conversation::new(
                    self.system_prompt.as_ref(),
                    self.max_history,
                )))
            })
            .value()
            .clone()
    }

    /// Look up a conversation without creating it.
    pub fn get(&self, conversation_id: &str) -> Option<SharedConversation> {
        let entry = self.sessions.get(conversation_id)?;
        debug!(conversation_id, "Retrieved conversation from store");
        Some(entry.value().clone())
    }

    /// Number of conversations held in memory
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
