//! Question handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request to ask a question about the sales data.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// The question to ask.
    pub question: String,
}

/// Response with the agent's answer.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// The answer text, beginning with the sentinel marker.
    pub answer: String,
}

/// POST /api/ask - answer one question.
///
/// The agent call is synchronous and blocking; it runs on the blocking pool
/// while the page shows its busy indicator. Failures are returned with their
/// detail and the next question proceeds normally.
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let agent = state.agent.clone().ok_or_else(|| {
        ApiError::NoData(
            state
                .load_error
                .clone()
                .unwrap_or_else(|| "workbook not loaded".to_string()),
        )
    })?;

    let question = request.question.trim().to_string();
    if question.is_empty() {
        return Err(ApiError::BadRequest("question is empty".to_string()));
    }

    let answer = tokio::task::spawn_blocking(move || agent.answer(&question))
        .await
        .map_err(|e| ApiError::Internal(format!("agent task failed: {}", e)))?
        .map_err(|e| ApiError::Query(e.to_string()))?;

    Ok(Json(AskResponse { answer }))
}
