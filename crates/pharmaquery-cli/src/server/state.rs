//! Application state for the web server.

use std::path::PathBuf;
use std::sync::Arc;

use pharmaquery::{TabularAgent, Workbook};

/// Shared application state.
///
/// The workbook and agent are present only when the load succeeded; a failed
/// load leaves the page in a "no data" state carrying the error message.
#[derive(Clone)]
pub struct AppState {
    /// The loaded workbook, read-only for the process lifetime.
    pub workbook: Option<Arc<Workbook>>,
    /// The query agent, constructed once per process.
    pub agent: Option<Arc<dyn TabularAgent>>,
    /// Load error message when the workbook could not be read.
    pub load_error: Option<String>,
    /// Model identifier (for display).
    pub model_name: String,
    /// Path to the workbook file.
    pub workbook_path: PathBuf,
}

impl AppState {
    /// State for a successfully loaded workbook.
    pub fn ready(
        workbook: Arc<Workbook>,
        agent: Arc<dyn TabularAgent>,
        model_name: String,
        workbook_path: PathBuf,
    ) -> Self {
        Self {
            workbook: Some(workbook),
            agent: Some(agent),
            load_error: None,
            model_name,
            workbook_path,
        }
    }

    /// State for a failed load: no data, no agent, error retained.
    pub fn load_failed(workbook_path: PathBuf, error: String, model_name: String) -> Self {
        Self {
            workbook: None,
            agent: None,
            load_error: Some(error),
            model_name,
            workbook_path,
        }
    }

    /// Whether questions can be accepted.
    pub fn is_ready(&self) -> bool {
        self.workbook.is_some() && self.agent.is_some()
    }
}
