//! Mock chat model for testing.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::provider::{ChatMessage, ChatModel, LlmConfig};
use crate::error::{PharmaQueryError, Result};

enum ScriptedReply {
    Text(String),
    Failure(String),
}

/// Chat model that returns scripted replies for testing and offline runs.
///
/// Replies are consumed in order; once the queue is empty, a canned final
/// answer is produced so mock-mode sessions stay usable.
pub struct MockChatModel {
    config: LlmConfig,
    replies: Mutex<VecDeque<ScriptedReply>>,
}

impl MockChatModel {
    /// Create a mock with an empty reply queue.
    pub fn new() -> Self {
        Self {
            config: LlmConfig {
                model: "mock".to_string(),
                ..LlmConfig::default()
            },
            replies: Mutex::new(VecDeque::new()),
        }
    }

    /// Create a mock preloaded with replies.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mock = Self::new();
        for reply in replies {
            mock.push_reply(reply);
        }
        mock
    }

    /// Queue a reply.
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies
            .lock()
            .expect("mock reply queue lock")
            .push_back(ScriptedReply::Text(reply.into()));
    }

    /// Queue a failure.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.replies
            .lock()
            .expect("mock reply queue lock")
            .push_back(ScriptedReply::Failure(message.into()));
    }
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatModel for MockChatModel {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        match self.replies.lock().expect("mock reply queue lock").pop_front() {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Failure(message)) => Err(PharmaQueryError::Agent(message)),
            None => {
                let last_question = messages
                    .iter()
                    .rev()
                    .find(|m| m.role == "user")
                    .map(|m| m.content.lines().next().unwrap_or_default().to_string())
                    .unwrap_or_default();
                Ok(format!(
                    "Final Answer: (mock) no live model is configured; the question was: {}",
                    last_question
                ))
            }
        }
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replies_consumed_in_order() {
        let mock = MockChatModel::with_replies(["one", "two"]);
        let messages = [ChatMessage::user("q")];
        assert_eq!(mock.complete(&messages).unwrap(), "one");
        assert_eq!(mock.complete(&messages).unwrap(), "two");
    }

    #[test]
    fn test_failure_then_canned_answer() {
        let mock = MockChatModel::new();
        mock.push_failure("boom");
        let messages = [ChatMessage::user("what is x?")];

        let err = mock.complete(&messages).unwrap_err();
        assert!(err.to_string().contains("boom"));

        let fallback = mock.complete(&messages).unwrap();
        assert!(fallback.starts_with("Final Answer:"));
        assert!(fallback.contains("what is x?"));
    }
}
