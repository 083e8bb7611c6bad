//! Load-state and sheet listing handler.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::server::state::AppState;

/// Summary of one loaded sheet.
#[derive(Debug, Serialize)]
pub struct SheetInfo {
    /// Sheet name.
    pub name: String,
    /// Number of data rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
}

/// Response for the status endpoint.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Whether questions can be accepted.
    pub ready: bool,
    /// Load error message when the workbook could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Workbook file being served.
    pub workbook: String,
    /// Model identifier.
    pub model: String,
    /// Loaded sheets in workbook order.
    pub sheets: Vec<SheetInfo>,
}

/// GET /api/status - report load state and loaded sheets.
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    match &state.workbook {
        Some(workbook) => Json(StatusResponse {
            ready: state.is_ready(),
            error: None,
            workbook: workbook.meta.file.clone(),
            model: state.model_name.clone(),
            sheets: workbook
                .iter()
                .map(|sheet| SheetInfo {
                    name: sheet.name.clone(),
                    rows: sheet.row_count(),
                    columns: sheet.column_count(),
                })
                .collect(),
        }),
        None => Json(StatusResponse {
            ready: false,
            error: state.load_error.clone(),
            workbook: state.workbook_path.display().to_string(),
            model: state.model_name.clone(),
            sheets: Vec::new(),
        }),
    }
}
