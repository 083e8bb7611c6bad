//! End-to-end agent tests: scripted chat model, real loaded workbook.

mod common;

use std::sync::Arc;

use pharmaquery::{
    ANSWER_SENTINEL, AgentConfig, FrameAgent, InstructionContext, MockChatModel,
    PharmaQueryError, RoutingRules, TabularAgent, Workbook,
};
use tempfile::{TempDir, tempdir};

fn load_fixture() -> (TempDir, Arc<Workbook>) {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("sales.xlsx");
    common::write_sales_workbook(&path);
    let workbook = Arc::new(Workbook::open(&path).expect("load workbook"));
    (dir, workbook)
}

fn agent_with(
    workbook: Arc<Workbook>,
    model: MockChatModel,
    config: AgentConfig,
) -> FrameAgent {
    FrameAgent::new(
        Arc::new(model),
        workbook,
        InstructionContext::new(RoutingRules::defaults(), 2025),
        config,
    )
}

#[test]
fn test_agent_executes_actions_and_answers_with_sentinel() {
    let (_dir, workbook) = load_fixture();
    let model = MockChatModel::with_replies([
        "```json\n{\"action\": \"columns\", \"table\": \"TotalSales\"}\n```",
        "```json\n{\"action\": \"sum\", \"table\": \"TotalSales\", \"column\": \"2025\", \
         \"filter\": {\"column\": \"Totalname\", \"contains\": \"Oseltamivir\"}}\n```",
        "Final Answer: OseltamivirX's total sales in 2025 were 1000.",
    ]);
    let agent = agent_with(workbook, model, AgentConfig::default());

    let answer = agent
        .answer("What is OseltamivirX's total sales in 2025?")
        .expect("answer");

    assert!(answer.starts_with(ANSWER_SENTINEL));
    assert!(answer.contains("1000"));
}

#[test]
fn test_system_prompt_covers_sheets_rules_and_protocol() {
    let (_dir, workbook) = load_fixture();
    let agent = agent_with(workbook, MockChatModel::new(), AgentConfig::default());
    let prompt = agent.system_prompt();

    assert!(prompt.contains("Table 1 corresponds to sheet: TotalSales"));
    assert!(prompt.contains("Table 2 corresponds to sheet: GenericSalesCombined"));
    assert!(prompt.contains("Table 3 corresponds to sheet: DrugCatalog"));
    assert!(prompt.contains("first match wins"));
    assert!(prompt.contains("\"action\": \"sum\""));
    assert!(prompt.contains(ANSWER_SENTINEL));
}

#[test]
fn test_parse_error_recovery_then_answer() {
    let (_dir, workbook) = load_fixture();
    let model = MockChatModel::with_replies([
        "Let me think about which table to use here.",
        "Final Answer: 42",
    ]);
    let agent = agent_with(workbook, model, AgentConfig::default());

    let answer = agent.answer("anything").expect("recovered answer");
    assert_eq!(answer, "Final Answer: 42");
}

#[test]
fn test_sentinel_buried_mid_reply_still_counts() {
    let (_dir, workbook) = load_fixture();
    let model = MockChatModel::with_replies([
        "After reviewing the data I can say. Final Answer: 77 units.",
    ]);
    let agent = agent_with(workbook, model, AgentConfig::default());

    let answer = agent.answer("anything").expect("answer");
    assert!(answer.starts_with(ANSWER_SENTINEL));
    assert!(answer.contains("77"));
}

#[test]
fn test_iteration_cap_bounds_the_loop() {
    let (_dir, workbook) = load_fixture();
    let model = MockChatModel::with_replies(["junk", "junk", "junk"]);
    let agent = agent_with(
        workbook,
        model,
        AgentConfig {
            max_iterations: 3,
            recover_parse_errors: true,
        },
    );

    let err = agent.answer("anything").unwrap_err();
    assert!(matches!(err, PharmaQueryError::Agent(_)));
    assert!(err.to_string().contains("3 iterations"));
}

#[test]
fn test_strict_mode_fails_on_unparseable_reply() {
    let (_dir, workbook) = load_fixture();
    let model = MockChatModel::with_replies(["total gibberish"]);
    let agent = agent_with(
        workbook,
        model,
        AgentConfig {
            max_iterations: 5,
            recover_parse_errors: false,
        },
    );

    let err = agent.answer("anything").unwrap_err();
    assert!(err.to_string().contains("neither an action nor a final answer"));
}

#[test]
fn test_failed_question_does_not_poison_the_session() {
    let (_dir, workbook) = load_fixture();
    let model = MockChatModel::new();
    model.push_failure("connection reset by peer");
    model.push_reply(
        "```json\n{\"action\": \"sum\", \"table\": \"TotalSales\", \"column\": \"2025\", \
         \"filter\": {\"column\": \"Totalname\", \"contains\": \"Oseltamivir\"}}\n```",
    );
    model.push_reply("Final Answer: 1000 after retry.");
    let agent = agent_with(Arc::clone(&workbook), model, AgentConfig::default());

    let err = agent.answer("first question").unwrap_err();
    assert!(err.to_string().contains("connection reset by peer"));

    // Cached data is untouched and the next question succeeds.
    let totals = workbook.sheet("TotalSales").expect("sheet");
    assert_eq!(totals.get(0, 2), Some("600"));

    let answer = agent.answer("second question").expect("answer");
    assert!(answer.starts_with(ANSWER_SENTINEL));
    assert!(answer.contains("1000"));
}

#[test]
fn test_repeat_question_leaves_workbook_unchanged() {
    let (_dir, workbook) = load_fixture();
    let model = MockChatModel::with_replies([
        "```json\n{\"action\": \"filter\", \"table\": \"TotalSales\", \
         \"column\": \"Totalname\", \"contains\": \"Oseltamivir\"}\n```",
        "Final Answer: first pass.",
        "```json\n{\"action\": \"filter\", \"table\": \"TotalSales\", \
         \"column\": \"Totalname\", \"contains\": \"Oseltamivir\"}\n```",
        "Final Answer: second pass.",
    ]);
    let agent = agent_with(Arc::clone(&workbook), model, AgentConfig::default());

    let before: Vec<Vec<String>> = workbook
        .sheet("TotalSales")
        .expect("sheet")
        .rows
        .clone();

    agent.answer("same question").expect("first answer");
    agent.answer("same question").expect("second answer");

    assert_eq!(workbook.sheet("TotalSales").expect("sheet").rows, before);
}
