pub mod settings;

pub use settings::{ConversationConfig, LlmConfig, LoggingConfig, PromptsConfig, ServerConfig, Settings};
