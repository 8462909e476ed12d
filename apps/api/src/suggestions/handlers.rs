//! Axum route handlers for the suggestion API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::ResumeDocument;
use crate::models::suggestion::Suggestion;
use crate::optimize::handlers::{parse_gap, pipeline};
use crate::optimize::orchestrator::optimize_with_suggestions;
use crate::state::AppState;
use crate::store;
use crate::suggestions::generator::generate_suggestions;

#[derive(Debug, Serialize)]
pub struct SuggestionBatchResponse {
    pub job_id: Uuid,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
pub struct ApplySuggestionsRequest {
    pub suggestion_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ApplySuggestionsResponse {
    pub job_id: Uuid,
    pub applied: usize,
    pub document: ResumeDocument,
}

/// POST /api/v1/jobs/:id/suggestions
///
/// Generates the bulk suggestion batch for a job and persists it. The user
/// accepts a subset later via the apply endpoint.
pub async fn handle_generate_suggestions(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<SuggestionBatchResponse>, AppError> {
    let job = store::fetch_job(&state.db, job_id).await?;
    let resume = store::fetch_resume(&state.db, job.resume_id).await?;

    if resume.raw_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Resume has no extracted text to analyze".to_string(),
        ));
    }

    let gap = parse_gap(&job)?;
    let suggestions = generate_suggestions(
        state.llm.as_ref(),
        &state.prompts,
        &resume.raw_text,
        gap.as_ref(),
    )
    .await?;

    store::insert_suggestions(&state.db, job_id, &suggestions).await?;
    info!("Generated {} suggestions for job {job_id}", suggestions.len());

    Ok(Json(SuggestionBatchResponse {
        job_id,
        suggestions,
    }))
}

/// POST /api/v1/jobs/:id/suggestions/apply
///
/// Applies an accepted subset: sections with suggestions get one rewrite
/// call each; the rest pass through the formatter unchanged.
pub async fn handle_apply_suggestions(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(request): Json<ApplySuggestionsRequest>,
) -> Result<Json<ApplySuggestionsResponse>, AppError> {
    if request.suggestion_ids.is_empty() {
        return Err(AppError::Validation(
            "suggestion_ids cannot be empty".to_string(),
        ));
    }

    let job = store::fetch_job(&state.db, job_id).await?;
    let resume = store::fetch_resume(&state.db, job.resume_id).await?;

    let accepted =
        store::accept_suggestions(&state.db, job_id, &request.suggestion_ids).await?;
    let applied = accepted.len();

    let document =
        optimize_with_suggestions(&pipeline(&state), &resume.raw_text, accepted).await?;

    let document_value = serde_json::to_value(&document)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize document: {e}")))?;
    store::save_job_document(&state.db, job_id, &document_value).await?;

    info!("Applied {applied} suggestions to job {job_id}");

    Ok(Json(ApplySuggestionsResponse {
        job_id,
        applied,
        document,
    }))
}
