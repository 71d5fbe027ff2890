//! Text-completion port
//!
//! Defines the interface to the language model. The core sends an ordered
//! list of chat messages and gets raw text back; everything about providers,
//! transports and credentials lives in the adapter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the conversation
    System,
    /// The request
    User,
    /// A previous model reply
    Assistant,
}

/// One message sent to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who is speaking
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// A system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// A user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Failure of the completion service itself
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompletionError {
    /// Transport or provider fault
    #[error("AI service unavailable: {0}")]
    Unavailable(String),
}

/// A black-box text-completion service
pub trait TextCompletion: Send + Sync {
    /// Complete the conversation and return the model's text
    fn complete(&self, messages: &[ChatMessage], temperature: f32)
    -> Result<String, CompletionError>;

    /// Short name for health reports
    fn name(&self) -> &str {
        "llm"
    }

    /// Probe the service with a trivial request
    fn health_check(&self) -> Result<(), CompletionError> {
        self.complete(&[ChatMessage::user("test")], 0.0).map(|_| ())
    }
}
