//! Sheet preview handler.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Maximum number of rows to return in a preview.
const MAX_PREVIEW_ROWS: usize = 100;

/// Response for the sheet preview endpoint.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    /// Sheet name.
    pub name: String,
    /// Column headers.
    pub headers: Vec<String>,
    /// Data rows (first N rows).
    pub rows: Vec<Vec<String>>,
    /// Total row count in the sheet.
    pub total_rows: usize,
    /// Whether the data was truncated.
    pub truncated: bool,
}

/// GET /api/preview/:sheet - first rows of one sheet.
pub async fn get_sheet_preview(
    State(state): State<AppState>,
    Path(sheet_name): Path<String>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let workbook = state.workbook.as_ref().ok_or_else(|| {
        ApiError::NoData(
            state
                .load_error
                .clone()
                .unwrap_or_else(|| "workbook not loaded".to_string()),
        )
    })?;

    let sheet = workbook
        .sheet(&sheet_name)
        .ok_or_else(|| ApiError::NotFound(format!("No sheet named '{}'", sheet_name)))?;

    let total_rows = sheet.row_count();
    let truncated = total_rows > MAX_PREVIEW_ROWS;
    let rows: Vec<Vec<String>> = sheet.rows.iter().take(MAX_PREVIEW_ROWS).cloned().collect();

    Ok(Json(PreviewResponse {
        name: sheet.name.clone(),
        headers: sheet.headers.clone(),
        rows,
        total_rows,
        truncated,
    }))
}
