//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PharmaQuery: LLM-driven Q&A over pharmaceutical sales workbooks
#[derive(Parser)]
#[command(name = "pharmaquery")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a pharmaquery.toml config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a single question and print the answer
    Ask {
        /// The question to ask
        #[arg(value_name = "QUESTION")]
        question: String,

        /// Path to the sales workbook (overrides config)
        #[arg(short, long)]
        workbook: Option<PathBuf>,

        /// Use the scripted mock model instead of a live LLM
        #[arg(long)]
        mock_llm: bool,
    },

    /// List the sheets of the workbook
    Sheets {
        /// Path to the sales workbook (overrides config)
        #[arg(short, long)]
        workbook: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the single-page web UI
    Serve {
        /// Path to the sales workbook (overrides config)
        #[arg(short, long)]
        workbook: Option<PathBuf>,

        /// Port for the web server (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Don't automatically open the browser
        #[arg(long)]
        no_open: bool,

        /// Use the scripted mock model instead of a live LLM
        #[arg(long)]
        mock_llm: bool,
    },
}
