//! Chat model trait and types.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One message in a chat-completion conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role: "system", "user", or "assistant".
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Configuration for chat model providers.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,
    /// Model identifier (e.g. "deepseek-chat").
    pub model: String,
    /// Maximum tokens in a response.
    pub max_tokens: usize,
    /// Temperature for generation (0.0-1.0).
    pub temperature: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            max_tokens: 1024,
            temperature: 0.0,
        }
    }
}

/// Trait for chat-completion model providers.
///
/// Implementations must be thread-safe (Send + Sync) so the agent can be
/// shared across server handlers.
pub trait ChatModel: Send + Sync {
    /// Send a conversation and return the model's reply text.
    fn complete(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Get the configuration for this provider.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this provider (for logging/display).
    fn name(&self) -> &str;
}
