//! CLI subcommand implementations.

pub mod ask;
pub mod serve;
pub mod sheets;

use std::sync::Arc;

use pharmaquery::{
    AgentConfig, AppConfig, ChatModel, FrameAgent, InstructionContext, MockChatModel,
    OpenAiProvider, Result, RoutingRules, Workbook,
};

/// Wire up the agent from config: model, rules, context, policy flags.
pub(crate) fn build_agent(
    config: &AppConfig,
    workbook: Arc<Workbook>,
    mock_llm: bool,
) -> Result<FrameAgent> {
    let model: Arc<dyn ChatModel> = if mock_llm {
        Arc::new(MockChatModel::new())
    } else {
        let api_key = config.resolve_api_key()?;
        Arc::new(OpenAiProvider::with_config(api_key, config.llm_config())?)
    };

    let rules = match &config.rules_path {
        Some(path) => RoutingRules::from_json_file(path)?,
        None => RoutingRules::defaults(),
    };
    let context = InstructionContext::new(rules, config.default_year);

    let agent_config = AgentConfig {
        max_iterations: config.max_iterations,
        ..AgentConfig::default()
    };

    Ok(FrameAgent::new(model, workbook, context, agent_config))
}
