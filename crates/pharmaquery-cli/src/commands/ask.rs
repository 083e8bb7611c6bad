//! Ask command - answer a single question from the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use pharmaquery::{AppConfig, TabularAgent, Workbook};

pub fn run(
    question: String,
    workbook: Option<PathBuf>,
    mock_llm: bool,
    config_path: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load_or_default(config_path.as_deref())?;
    if let Some(path) = workbook {
        config.workbook_path = path;
    }

    if verbose {
        println!("Loading workbook {}", config.workbook_path.display());
    }
    let workbook = Arc::new(Workbook::open(&config.workbook_path)?);
    println!(
        "{} {}",
        "Loaded sheets:".green(),
        workbook.sheet_names().join(", ")
    );

    let agent = super::build_agent(&config, workbook, mock_llm)?;

    let answer = agent.answer(&question)?;
    println!();
    println!("{}", answer);
    Ok(())
}
