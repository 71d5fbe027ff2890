//! OpenAI-compatible chat-completions adapter
//!
//! Implements `TextCompletion` against any endpoint speaking the
//! `/chat/completions` protocol. Requests run on a private current-thread
//! tokio runtime so the port stays synchronous.
//!
//! Because `complete` blocks on that runtime, it must not be called from
//! inside another tokio runtime (tokio panics with "Cannot start a runtime
//! from within a runtime"). Async callers should run it through
//! `tokio::task::spawn_blocking`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::core::ports::{ChatMessage, CompletionError, TextCompletion};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client
#[derive(Debug)]
pub struct OpenAiCompletion {
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiCompletion {
    /// Build a client from configuration
    pub fn new(config: &LlmConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        Ok(Self {
            client,
            runtime,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    async fn send(&self, messages: &[ChatMessage], temperature: f32) -> Result<String, String> {
        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature,
            max_tokens: self.max_tokens,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| format!("request: {e}"))?
            .error_for_status()
            .map_err(|e| format!("status: {e}"))?;
        let parsed: ChatResponse = response.json().await.map_err(|e| format!("decode: {e}"))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| "model returned no text".to_string())
    }
}

impl TextCompletion for OpenAiCompletion {
    fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, CompletionError> {
        log::debug!("Sending {} messages to {} ({})", messages.len(), self.endpoint, self.model);
        self.runtime.block_on(self.send(messages, temperature)).map_err(|e| {
            log::error!("Completion call failed: {e}");
            CompletionError::Unavailable(e)
        })
    }

    fn name(&self) -> &str {
        "openai"
    }
}
