//! PharmaQuery: LLM-driven question answering over pharmaceutical sales
//! workbooks.
//!
//! The workbook is read once into an immutable set of schema-less tables; an
//! instruction block maps question categories onto sheets via editable
//! business rules; and a bounded reason/act agent turns each question into
//! table operations and a final answer.
//!
//! # Core Principles
//!
//! - **Read-only data**: the workbook is loaded once and never mutated
//! - **Rules as data**: sheet routing rules are configuration, not code
//! - **No recall**: every figure in an answer comes from an executed
//!   table operation, shown raw before the conclusion
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pharmaquery::{
//!     AgentConfig, FrameAgent, InstructionContext, MockChatModel, RoutingRules,
//!     TabularAgent, Workbook,
//! };
//!
//! let workbook = Arc::new(Workbook::open("sales_workbook.xlsx").unwrap());
//! let context = InstructionContext::new(RoutingRules::defaults(), 2025);
//! let agent = FrameAgent::new(
//!     Arc::new(MockChatModel::new()),
//!     workbook,
//!     context,
//!     AgentConfig::default(),
//! );
//!
//! let answer = agent.answer("What were OseltamivirX's total sales in 2025?").unwrap();
//! println!("{answer}");
//! ```

pub mod agent;
pub mod config;
pub mod context;
pub mod error;
pub mod llm;
pub mod workbook;

pub use agent::{AgentAction, AgentConfig, FrameAgent, ScriptedAgent, TabularAgent};
pub use config::{AppConfig, DEFAULT_CONFIG_FILE};
pub use context::{ANSWER_SENTINEL, InstructionContext, RoutingRule, RoutingRules};
pub use error::{PharmaQueryError, Result};
pub use llm::{ChatMessage, ChatModel, LlmConfig, MockChatModel, OpenAiProvider};
pub use workbook::{Sheet, Workbook, WorkbookCache, WorkbookMeta};
