use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::error::ChatError;

// ===== MESSAGE MODELS =====

/// Author of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(ChatError::InvalidArgument(format!(
                "unknown role '{}', expected one of: system, user, assistant",
                other
            ))),
        }
    }
}

/// A single immutable chat message, serialized in the provider wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    role: Role,
    content: String,
}

impl ChatMessage {
    /// Build a message, rejecting blank content.
    pub fn new(role: Role, content: impl Into<String>) -> Result<Self, ChatError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ChatError::InvalidArgument(format!(
                "{} message content must not be empty",
                role
            )));
        }
        Ok(Self { role, content })
    }

    pub fn system(content: impl Into<String>) -> Result<Self, ChatError> {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Result<Self, ChatError> {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Result<Self, ChatError> {
        Self::new(Role::Assistant, content)
    }

    /// Configured system prompt; its validity is checked when settings load.
    pub(crate) fn pinned_system(content: String) -> Self {
        Self {
            role: Role::System,
            content,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

// ===== REQUEST MODELS =====

fn default_role() -> String {
    "user".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, message = "message must not be empty"))]
    pub message: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[validate(length(min = 3, message = "conversation_id must be at least 3 characters"))]
    pub conversation_id: String,
}

// ===== RESPONSE MODELS =====

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EndSessionResponse {
    pub conversation_id: String,
    pub active: bool,
}
