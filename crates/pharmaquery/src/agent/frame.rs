//! The table-querying agent: a bounded reason/act loop over a chat model.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::actions::{self, ACTION_PROTOCOL, AgentAction};
use super::TabularAgent;
use crate::context::{ANSWER_SENTINEL, InstructionContext};
use crate::error::{PharmaQueryError, Result};
use crate::llm::{ChatMessage, ChatModel};
use crate::workbook::Workbook;

/// Execution policy for the agent loop.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Maximum reason/act iterations per question, bounding latency and cost.
    pub max_iterations: usize,
    /// Tolerate model replies that parse as neither action nor answer by
    /// feeding back a format reminder instead of aborting.
    pub recover_parse_errors: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            recover_parse_errors: true,
        }
    }
}

/// Agent bound to a chat model, the loaded workbook, and the instruction
/// context. Constructed once per process; each question is answered
/// independently with no conversational memory.
pub struct FrameAgent {
    model: Arc<dyn ChatModel>,
    workbook: Arc<Workbook>,
    context: InstructionContext,
    config: AgentConfig,
    system_prompt: String,
}

impl FrameAgent {
    /// Create an agent over the given model, workbook, and context.
    pub fn new(
        model: Arc<dyn ChatModel>,
        workbook: Arc<Workbook>,
        context: InstructionContext,
        config: AgentConfig,
    ) -> Self {
        let sheet_names = workbook.sheet_names();
        let system_prompt = format!("{}\n\n{}", context.render(&sheet_names), ACTION_PROTOCOL);
        Self {
            model,
            workbook,
            context,
            config,
            system_prompt,
        }
    }

    /// The rendered system prompt (instruction block plus action protocol).
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn opening_user_message(&self, question: &str) -> ChatMessage {
        let mut content = question.trim().to_string();
        if let Some(rule) = self.context.rules().route(question) {
            content.push_str(&format!(
                "\n\n(Routing hint: this looks like a question about {}; the table whose \
                 sheet name contains \"{}\" is likely the right one.)",
                rule.category, rule.sheet_keyword
            ));
        }
        ChatMessage::user(content)
    }
}

impl TabularAgent for FrameAgent {
    fn answer(&self, question: &str) -> Result<String> {
        let mut messages = vec![
            ChatMessage::system(self.system_prompt.clone()),
            self.opening_user_message(question),
        ];

        for iteration in 1..=self.config.max_iterations {
            debug!(iteration, max = self.config.max_iterations, "agent iteration");
            let reply = self.model.complete(&messages)?;

            // A reply that leads with the sentinel is the final answer.
            if reply.trim_start().starts_with(ANSWER_SENTINEL) {
                return Ok(reply.trim().to_string());
            }

            if let Some(action) = parse_action(&reply) {
                let observation = actions::execute(&self.workbook, &action);
                debug!(?action, "executed table action");
                messages.push(ChatMessage::assistant(reply));
                messages.push(ChatMessage::user(format!("Observation:\n{}", observation)));
                continue;
            }

            // The sentinel buried mid-reply still counts as an answer.
            if let Some(idx) = reply.find(ANSWER_SENTINEL) {
                return Ok(reply[idx..].trim().to_string());
            }

            if !self.config.recover_parse_errors {
                return Err(PharmaQueryError::Agent(format!(
                    "model reply was neither an action nor a final answer: {}",
                    reply
                )));
            }
            warn!("unparseable model reply; sending format reminder");
            messages.push(ChatMessage::assistant(reply));
            messages.push(ChatMessage::user(FORMAT_REMINDER.to_string()));
        }

        Err(PharmaQueryError::Agent(format!(
            "no final answer after {} iterations",
            self.config.max_iterations
        )))
    }

    fn name(&self) -> &str {
        "frame"
    }
}

const FORMAT_REMINDER: &str = "Your reply could not be interpreted. Reply with exactly one \
JSON action in a ```json fenced block, or with a final answer beginning with 'Final Answer:'.";

static FENCED_JSON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("fenced JSON regex")
});

/// Extract a table action from a model reply: a fenced JSON block first,
/// then a bare JSON object.
fn parse_action(reply: &str) -> Option<AgentAction> {
    if let Some(captures) = FENCED_JSON.captures(reply) {
        if let Ok(action) = serde_json::from_str(captures.get(1)?.as_str()) {
            return Some(action);
        }
    }

    let trimmed = reply.trim();
    if trimmed.starts_with('{') {
        if let Ok(action) = serde_json::from_str(trimmed) {
            return Some(action);
        }
    }

    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if start < end {
        serde_json::from_str(&reply[start..=end]).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action_fenced_and_bare() {
        let fenced = "Let me check.\n```json\n{\"action\": \"list_tables\"}\n```";
        assert_eq!(parse_action(fenced), Some(AgentAction::ListTables));

        let bare = "{\"action\": \"columns\", \"table\": \"TotalSales\"}";
        assert!(matches!(
            parse_action(bare),
            Some(AgentAction::Columns { .. })
        ));

        let embedded = "I will run {\"action\": \"list_tables\"} now.";
        assert_eq!(parse_action(embedded), Some(AgentAction::ListTables));

        assert_eq!(parse_action("no action here"), None);
        assert_eq!(parse_action("{\"action\": \"unknown_verb\"}"), None);
    }
}
