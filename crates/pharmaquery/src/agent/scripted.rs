//! Scripted agent for testing the orchestration around the agent boundary.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::TabularAgent;
use crate::error::{PharmaQueryError, Result};

enum Outcome {
    Answer(String),
    Failure(String),
}

/// Agent that replays scripted answers and failures, in order.
///
/// Once the queue is empty it echoes the question back in a well-formed
/// answer, so it can stand in for the real agent in UI smoke runs.
pub struct ScriptedAgent {
    outcomes: Mutex<VecDeque<Outcome>>,
}

impl ScriptedAgent {
    /// Create a scripted agent with an empty queue.
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue an answer.
    pub fn push_answer(&self, answer: impl Into<String>) {
        self.outcomes
            .lock()
            .expect("scripted outcome lock")
            .push_back(Outcome::Answer(answer.into()));
    }

    /// Queue a failure.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.outcomes
            .lock()
            .expect("scripted outcome lock")
            .push_back(Outcome::Failure(message.into()));
    }
}

impl Default for ScriptedAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl TabularAgent for ScriptedAgent {
    fn answer(&self, question: &str) -> Result<String> {
        match self.outcomes.lock().expect("scripted outcome lock").pop_front() {
            Some(Outcome::Answer(answer)) => Ok(answer),
            Some(Outcome::Failure(message)) => Err(PharmaQueryError::Agent(message)),
            None => Ok(format!("Final Answer: scripted reply to: {}", question)),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
