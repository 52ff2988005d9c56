use chrono::{DateTime, Utc};

use crate::models::chat::ChatMessage;

/// Sampling parameters forwarded with every completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

/// Bounded message history for one session.
///
/// `messages[0]` is the pinned system prompt and is never evicted. The
/// remaining messages form a FIFO window of at most `max_history` entries.
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    active: bool,
    max_history: usize,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new active conversation seeded with the system prompt.
    pub fn new(system_prompt: impl Into<String>, max_history: usize) -> Self {
        let now = Utc::now();
        let mut messages = Vec::with_capacity(max_history.saturating_add(1).min(64));
        messages.push(ChatMessage::pinned_system(system_prompt.into()));

        Self {
            messages,
            active: true,
            max_history,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message, evicting the oldest non-system messages once the
    /// window is over capacity.
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);

        let capacity = self.max_history + 1;
        if self.messages.len() > capacity {
            let excess = self.messages.len() - capacity;
            self.messages.drain(1..1 + excess);
        }

        self.updated_at = Utc::now();
    }

    /// Mark the conversation as ended. There is no way back.
    pub fn mark_ended(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    pub fn system_prompt(&self) -> &str {
        self.messages[0].content()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Number of non-system messages currently retained.
    pub fn history_len(&self) -> usize {
        self.messages.len() - 1
    }
}
