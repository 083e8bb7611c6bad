//! Chat model providers.
//!
//! The agent only needs the chat-completion contract: a conversation in,
//! one reply out. `OpenAiProvider` speaks that protocol against any
//! OpenAI-compatible endpoint (DeepSeek by default); `MockChatModel` serves
//! tests and offline runs.

mod mock;
mod openai;
mod provider;

pub use mock::MockChatModel;
pub use openai::OpenAiProvider;
pub use provider::{ChatMessage, ChatModel, LlmConfig};
