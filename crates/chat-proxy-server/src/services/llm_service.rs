use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::models::chat::ChatMessage;
use crate::services::conversation::manager::LlmProvider;
use crate::services::conversation::types::ModelConfig;
use crate::utils::error::ChatError;

/// Longest slice of an upstream error body carried into the error message
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Trimmed text of the first choice, or `EmptyResponse` if there is none.
    pub fn into_reply(self) -> Result<String, ChatError> {
        let content = self
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        let reply = content.trim();
        if reply.is_empty() {
            return Err(ChatError::EmptyResponse);
        }
        Ok(reply.to_string())
    }
}

/// OpenAI-compatible chat completion client (Groq by default).
#[derive(Clone)]
pub struct LlmService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl LlmService {
    pub fn new(config: &LlmConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Generate completion without streaming (wait for full response)
    pub async fn generate_chat(
        &self,
        messages: &[ChatMessage],
        config: &ModelConfig,
    ) -> Result<String, ChatError> {
        let api_key = self.api_key.as_deref().ok_or(ChatError::NotConfigured)?;

        debug!(
            "Starting chat generation with {} messages (model={})",
            messages.len(),
            config.model
        );

        let request = ChatCompletionRequest {
            model: &config.model,
            messages,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            top_p: config.top_p,
            stream: false,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Completion request failed: {}", e);
                ChatError::UpstreamFailure(format!("Failed to call LLM API: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            warn!("Completion provider returned {}", status);
            return Err(ChatError::UpstreamFailure(format!(
                "LLM API error: {} - {}",
                status, body
            )));
        }

        let chat_response: ChatCompletionResponse = response.json().await.map_err(|e| {
            ChatError::UpstreamFailure(format!("Failed to parse LLM response: {}", e))
        })?;

        chat_response.into_reply()
    }
}

#[async_trait::async_trait]
impl LlmProvider for LlmService {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        config: &ModelConfig,
    ) -> Result<String, ChatError> {
        self.generate_chat(messages, config).await
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
