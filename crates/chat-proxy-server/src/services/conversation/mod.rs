//! Conversation state management module
//!
//! Provides in-memory conversation state with:
//! - Thread-safe session storage (DashMap, one mutex per conversation)
//! - Pinned system prompt and FIFO history window
//! - Turn orchestration against the completion provider

pub mod manager;
pub mod prompt;
pub mod store;
pub mod types;

pub use manager::{ConversationManager, LlmProvider};
pub use store::{SessionStore, SharedConversation};
pub use types::{Conversation, ModelConfig};

// Re-export message types for convenience; they live in models
pub use crate::models::chat::{ChatMessage, Role};
