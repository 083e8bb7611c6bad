//! OpenAI-compatible chat-completion provider.
//!
//! Works against any endpoint speaking the `/chat/completions` protocol;
//! DeepSeek is the default deployment target.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;

use super::provider::{ChatMessage, ChatModel, LlmConfig};
use crate::error::{PharmaQueryError, Result};

/// OpenAI-compatible provider.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    config: LlmConfig,
}

impl OpenAiProvider {
    /// Create a new provider with the given API key and default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, LlmConfig::default())
    }

    /// Create a new provider with custom configuration.
    pub fn with_config(api_key: impl Into<String>, config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                PharmaQueryError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    /// Create from the `DEEPSEEK_API_KEY` (or `OPENAI_API_KEY`) environment
    /// variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("DEEPSEEK_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| {
                PharmaQueryError::Config(
                    "DEEPSEEK_API_KEY environment variable not set".to_string(),
                )
            })?;
        Self::new(api_key)
    }

    /// Build headers for API requests.
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| PharmaQueryError::Config(format!("Invalid API key: {}", e)))?,
        );
        Ok(headers)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

impl ChatModel for OpenAiProvider {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": messages,
        });

        let response = self
            .client
            .post(self.endpoint())
            .headers(self.build_headers()?)
            .json(&body)
            .send()
            .map_err(|e| PharmaQueryError::Agent(format!("LLM request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(PharmaQueryError::Agent(format!(
                "LLM API error ({}): {}",
                status, error_text
            )));
        }

        let api_response: CompletionResponse = response.json().map_err(|e| {
            PharmaQueryError::Agent(format!("Failed to parse API response: {}", e))
        })?;

        api_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| PharmaQueryError::Agent("No choices in LLM response".to_string()))
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "openai-compatible"
    }
}

/// Chat-completion API response structure.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}
