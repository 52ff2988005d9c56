use anyhow::{ensure, Result};
use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::services::conversation::prompt::DEFAULT_SYSTEM_PROMPT;
use crate::services::conversation::ModelConfig;

/// Settings file looked up relative to the working directory
const CONFIG_FILE: &str = "config/settings";
const CONFIG_EXTENSIONS: [&str; 6] = ["toml", "json", "yaml", "yml", "ini", "ron"];

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub conversation: ConversationConfig,
    pub prompts: PromptsConfig,
    pub logging: LoggingConfig,

    /// Settings file that was found at load time, if any
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub timeout_seconds: u64,
    /// Refuse to start without an API key instead of answering 503 per request
    pub require_api_key: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConversationConfig {
    /// Retained messages per conversation, not counting the system prompt
    pub max_history: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PromptsConfig {
    pub system_prompt: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// EnvFilter directive, overridden by RUST_LOG
    pub filter: String,
    pub json: bool,
}

impl LlmConfig {
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Settings {
    /// Load from defaults, `config/settings.*`, `APP__*` environment
    /// variables and `.env`, with `GROQ_API_KEY` as a credential fallback.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;
        settings.config_file = find_config_file();
        settings.finish(std::env::var("GROQ_API_KEY").ok())
    }

    /// Load from defaults overlaid with a TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config = Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.finish(None)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000_i64)?
            .set_default("llm.base_url", "https://api.groq.com/openai/v1")?
            .set_default("llm.model", "llama-3.1-8b-instant")?
            .set_default("llm.temperature", 1.0_f64)?
            .set_default("llm.max_tokens", 512_i64)?
            .set_default("llm.top_p", 1.0_f64)?
            .set_default("llm.timeout_seconds", 60_i64)?
            .set_default("llm.require_api_key", false)?
            .set_default("conversation.max_history", 20_i64)?
            .set_default("prompts.system_prompt", DEFAULT_SYSTEM_PROMPT)?
            .set_default("logging.filter", "info,chat_proxy_server=debug")?
            .set_default("logging.json", true)?)
    }

    /// Normalize the credential and validate. A blank configured key counts
    /// as missing, so `fallback_key` still applies.
    fn finish(mut self, fallback_key: Option<String>) -> Result<Self> {
        self.llm.api_key = non_blank(self.llm.api_key.take()).or_else(|| non_blank(fallback_key));
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.conversation.max_history >= 1,
            "conversation.max_history must be at least 1"
        );
        ensure!(
            !self.prompts.system_prompt.trim().is_empty(),
            "prompts.system_prompt must not be empty"
        );
        ensure!(!self.llm.model.trim().is_empty(), "llm.model must not be empty");
        ensure!(
            (0.0..=2.0).contains(&self.llm.temperature),
            "llm.temperature must be within [0, 2]"
        );
        ensure!(
            self.llm.top_p > 0.0 && self.llm.top_p <= 1.0,
            "llm.top_p must be within (0, 1]"
        );
        ensure!(self.llm.max_tokens >= 1, "llm.max_tokens must be at least 1");
        ensure!(
            self.llm.timeout_seconds >= 1,
            "llm.timeout_seconds must be at least 1"
        );
        Ok(())
    }
}

fn non_blank(key: Option<String>) -> Option<String> {
    key.map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

fn find_config_file() -> Option<PathBuf> {
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| Path::new(CONFIG_FILE).with_extension(ext))
        .find(|path| path.is_file())
}
