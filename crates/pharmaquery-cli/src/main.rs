//! PharmaQuery CLI - ask questions about pharmaceutical sales workbooks.

mod cli;
mod commands;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "pharmaquery=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Ask {
            question,
            workbook,
            mock_llm,
        } => commands::ask::run(question, workbook, mock_llm, cli.config, cli.verbose),

        Commands::Sheets { workbook, json } => {
            commands::sheets::run(workbook, json, cli.config, cli.verbose)
        }

        Commands::Serve {
            workbook,
            port,
            no_open,
            mock_llm,
        } => commands::serve::run(workbook, port, no_open, mock_llm, cli.config, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
