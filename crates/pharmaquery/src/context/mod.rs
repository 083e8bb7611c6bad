//! Prompt context construction: table labels, routing rules, and the output
//! contract handed to the agent.

mod builder;
mod rules;

pub use builder::InstructionContext;
pub use rules::{RoutingRule, RoutingRules};

/// Fixed prefix a well-formed answer must start with, so downstream UI code
/// can reliably tell answers from other output.
pub const ANSWER_SENTINEL: &str = "Final Answer:";
