//! The tabular-reasoning agent boundary.
//!
//! Question answering is an injected capability: anything that accepts a
//! question and produces a text answer over the loaded tables, and may fail
//! non-fatally. [`FrameAgent`] is the real implementation; [`ScriptedAgent`]
//! stands in for it in tests.

mod actions;
mod frame;
mod scripted;

pub use actions::{ACTION_PROTOCOL, AgentAction, FilterClause, execute};
pub use frame::{AgentConfig, FrameAgent};
pub use scripted::ScriptedAgent;

use crate::error::Result;

/// Answers one natural-language question about the loaded tables.
///
/// Implementations must be thread-safe; each question is independent, with
/// no conversational state between calls.
pub trait TabularAgent: Send + Sync {
    /// Answer a question, or fail non-fatally.
    fn answer(&self, question: &str) -> Result<String>;

    /// Get the name of this agent (for logging/display).
    fn name(&self) -> &str;
}
