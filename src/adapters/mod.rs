//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `toml/` - Compliance rule files and the `RuleStore` over them
//! - `openai` - `TextCompletion` over an OpenAI-compatible HTTP API
//!   (feature `llm`)
//! - [`OfflineCompletion`] - `TextCompletion` for builds without a model

#[cfg(feature = "llm")]
pub mod openai;
pub mod toml;

use crate::config::LlmConfig;
use crate::core::ports::{ChatMessage, CompletionError, TextCompletion};

/// Completion service that always reports itself unavailable
#[derive(Debug, Clone, Default)]
pub struct OfflineCompletion {
    reason: String,
}

impl OfflineCompletion {
    /// Offline service failing with `reason`
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl TextCompletion for OfflineCompletion {
    fn complete(&self, _: &[ChatMessage], _: f32) -> Result<String, CompletionError> {
        Err(CompletionError::Unavailable(self.reason.clone()))
    }

    fn name(&self) -> &str {
        "offline"
    }
}

/// The completion service selected by configuration and build features
pub fn completion_from_config(config: &LlmConfig) -> anyhow::Result<Box<dyn TextCompletion>> {
    #[cfg(feature = "llm")]
    {
        if config.api_key.is_empty() {
            log::warn!("No API key configured; set OPENAI_API_KEY or [llm].api_key");
        }
        Ok(Box::new(openai::OpenAiCompletion::new(config)?))
    }
    #[cfg(not(feature = "llm"))]
    {
        let _ = config;
        Ok(Box::new(OfflineCompletion::new("archsec was built without the `llm` feature")))
    }
}
