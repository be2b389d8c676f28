//! Delivery statistics endpoint.
//!
//! GET /api/v1/stats - Letters delivered so far.

use std::time::Instant;

use axum::extract::State;

use letterpost_core::storage::progress::ProgressTracker;
use letterpost_types::error::ComposeError;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/stats
pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();

    let completed = state
        .composer
        .progress()
        .completed_total()
        .await
        .map_err(ComposeError::from)?;

    let data = serde_json::json!({
        "completed_letters": completed,
    });

    Ok(ApiResponse::success(data, start.elapsed().as_millis() as u64))
}
