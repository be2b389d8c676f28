//! Composition endpoints.
//!
//! - POST /api/v1/owners/{id}/begin    - Start (or restart) a letter
//! - POST /api/v1/owners/{id}/submit   - Provide or skip the current field
//! - POST /api/v1/owners/{id}/cancel   - Abandon the letter in progress
//! - POST /api/v1/owners/{id}/finalize - Assemble, render, and deliver
//! - GET  /api/v1/owners/{id}/step     - Current step and its prompt

use std::path::PathBuf;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use letterpost_core::compose::template::Template;
use letterpost_types::error::ComposeError;
use letterpost_types::letter::{FieldName, SectionName, Step};
use letterpost_types::session::{OwnerId, Submission};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Body of a submit request: either `{"text": "..."}` or `{"skip": true}`.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub text: Option<String>,
    #[serde(default)]
    pub skip: bool,
}

impl SubmitRequest {
    fn into_submission(self) -> Result<Submission, AppError> {
        match (self.text, self.skip) {
            (Some(_), true) => Err(AppError::Validation(
                "provide either 'text' or 'skip', not both".to_string(),
            )),
            (Some(text), false) => Ok(Submission::Text(text)),
            (None, true) => Ok(Submission::Skip),
            (None, false) => Err(AppError::Validation(
                "provide 'text' or set 'skip' to true".to_string(),
            )),
        }
    }
}

/// Where a composition stands, with the question for the next field.
#[derive(Debug, Serialize)]
pub struct StepResponse {
    pub owner: OwnerId,
    pub step: Step,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<&'static str>,
}

impl StepResponse {
    fn new(owner: OwnerId, step: Step) -> Self {
        let field = step.field();
        Self {
            owner,
            step,
            field,
            prompt: field.map(|f| Template.spec(f).prompt),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub owner: OwnerId,
    pub cancelled: bool,
}

#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    pub owner: OwnerId,
    pub path: PathBuf,
    pub file_name: String,
    pub sections: Vec<SectionName>,
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// POST /api/v1/owners/{id}/begin
pub async fn begin(
    State(state): State<AppState>,
    Path(owner): Path<i64>,
) -> Result<ApiResponse<StepResponse>, AppError> {
    let start = Instant::now();
    let owner = OwnerId(owner);
    let session = state.composer.begin(owner).await?;
    Ok(ApiResponse::success(
        StepResponse::new(owner, session.step),
        elapsed_ms(start),
    ))
}

/// POST /api/v1/owners/{id}/submit
pub async fn submit(
    State(state): State<AppState>,
    Path(owner): Path<i64>,
    Json(request): Json<SubmitRequest>,
) -> Result<ApiResponse<StepResponse>, AppError> {
    let start = Instant::now();
    let owner = OwnerId(owner);
    let step = state
        .composer
        .submit(owner, request.into_submission()?)
        .await?;
    Ok(ApiResponse::success(StepResponse::new(owner, step), elapsed_ms(start)))
}

/// POST /api/v1/owners/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Path(owner): Path<i64>,
) -> Result<ApiResponse<CancelResponse>, AppError> {
    let start = Instant::now();
    let owner = OwnerId(owner);
    let cancelled = state.composer.cancel(owner).await?;
    Ok(ApiResponse::success(
        CancelResponse { owner, cancelled },
        elapsed_ms(start),
    ))
}

/// POST /api/v1/owners/{id}/finalize
pub async fn finalize(
    State(state): State<AppState>,
    Path(owner): Path<i64>,
) -> Result<ApiResponse<DeliveryResponse>, AppError> {
    let start = Instant::now();
    let delivery = state
        .composer
        .deliver(OwnerId(owner), state.renderer.as_ref())
        .await?;
    Ok(ApiResponse::success(
        DeliveryResponse {
            owner: delivery.owner,
            path: delivery.artifact.path,
            file_name: delivery.artifact.file_name,
            sections: delivery.sections,
        },
        elapsed_ms(start),
    ))
}

/// GET /api/v1/owners/{id}/step
pub async fn current_step(
    State(state): State<AppState>,
    Path(owner): Path<i64>,
) -> Result<ApiResponse<StepResponse>, AppError> {
    let start = Instant::now();
    let owner = OwnerId(owner);
    let step = state
        .composer
        .current_step(owner)
        .await?
        .ok_or(ComposeError::NoActiveSession(owner))?;
    Ok(ApiResponse::success(StepResponse::new(owner, step), elapsed_ms(start)))
}
