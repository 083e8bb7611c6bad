//! Serve command - host the single-page question/answer UI.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use pharmaquery::{AppConfig, Workbook};

use crate::server::{app, state::AppState};

pub fn run(
    workbook: Option<PathBuf>,
    port: Option<u16>,
    no_open: bool,
    mock_llm: bool,
    config_path: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load_or_default(config_path.as_deref())?;
    if let Some(path) = workbook {
        config.workbook_path = path;
    }
    let port = port.unwrap_or(config.port);
    let model_name = if mock_llm {
        "mock".to_string()
    } else {
        config.model.clone()
    };

    // A failed load still serves the page: it shows the error and offers no
    // question input until the file is fixed and the server restarted.
    let state = match Workbook::open(&config.workbook_path) {
        Ok(workbook) => {
            let workbook = Arc::new(workbook);
            if verbose {
                println!("Loading workbook {}", config.workbook_path.display());
            }
            println!(
                "{} {}",
                "Loaded sheets:".green(),
                workbook.sheet_names().join(", ")
            );
            let agent = super::build_agent(&config, Arc::clone(&workbook), mock_llm)?;
            AppState::ready(
                workbook,
                Arc::new(agent),
                model_name,
                config.workbook_path.clone(),
            )
        }
        Err(e) => {
            eprintln!("{} {}", "Workbook load failed:".red(), e);
            AppState::load_failed(config.workbook_path.clone(), e.to_string(), model_name)
        }
    };

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting PharmaQuery at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Workbook: {}", config.workbook_path.display());
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        tokio::spawn(async {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
            std::process::exit(0);
        });

        if let Err(e) = app::run_server(state, port).await {
            eprintln!("Server error: {}", e);
        }
    });

    Ok(())
}
