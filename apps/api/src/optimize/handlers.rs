//! Axum route handlers for the optimization API.
//!
//! Handlers stay thin: fetch rows, build the pipeline input, invoke the
//! orchestrator, persist, respond. All policy lives in the orchestrator.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::ResumeDocument;
use crate::models::gap::GapAnalysis;
use crate::models::job::JobRow;
use crate::optimize::orchestrator::{
    generate_comparison, optimize_for_job, optimize_resume, JobOptimizeInput, Pipeline,
    ResumeOptimizeInput,
};
use crate::state::AppState;
use crate::store;
use crate::store::PgArtifactSink;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct JobOptimizeResponse {
    pub job_id: Uuid,
    pub resume_url: String,
    pub cover_letter_url: String,
    pub cached: bool,
    /// Absent on a cache hit.
    pub document: Option<ResumeDocument>,
}

#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub job_id: Uuid,
    pub document: ResumeDocument,
}

#[derive(Debug, Default, Deserialize)]
pub struct OptimizeResumeRequest {
    #[serde(default)]
    pub gap_analysis: Option<GapAnalysis>,
}

#[derive(Debug, Serialize)]
pub struct ResumeOptimizeResponse {
    pub resume_id: Uuid,
    pub resume_url: String,
    pub cached: bool,
    pub document: Option<ResumeDocument>,
}

// ────────────────────────────────────────────────────────────────────────────
// Shared plumbing
// ────────────────────────────────────────────────────────────────────────────

pub(crate) fn pipeline(state: &AppState) -> Pipeline {
    Pipeline {
        llm: state.llm.clone(),
        renderer: state.renderer.clone(),
        storage: state.storage.clone(),
        prompts: state.prompts.clone(),
        regenerate_cover_letters: state.config.regenerate_cover_letters,
    }
}

pub(crate) fn parse_gap(job: &JobRow) -> Result<Option<GapAnalysis>, AppError> {
    job.gap_analysis
        .clone()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "Stored gap analysis for job {} unparseable: {e}",
                job.id
            ))
        })
}

fn document_value(document: &ResumeDocument) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(document)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize document: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/:id/optimize
///
/// Full job-based optimization with synchronous artifact generation. Repeat
/// requests for a job whose artifacts already exist return the stored URLs
/// without touching the gateway.
pub async fn handle_optimize_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobOptimizeResponse>, AppError> {
    let job = store::fetch_job(&state.db, job_id).await?;
    let resume = store::fetch_resume(&state.db, job.resume_id).await?;

    if resume.raw_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Resume has no extracted text to optimize".to_string(),
        ));
    }

    let input = JobOptimizeInput {
        job_id,
        resume_id: resume.id,
        resume_text: resume.raw_text,
        description: job.description.clone(),
        gap: parse_gap(&job)?,
        existing_resume_url: job.optimized_resume_url.clone(),
        existing_cover_letter_url: job.cover_letter_url.clone(),
    };

    let outcome = optimize_for_job(&pipeline(&state), &input).await?;

    if let Some(document) = &outcome.document {
        store::save_job_results(
            &state.db,
            job_id,
            &document_value(document)?,
            &outcome.resume_url,
            &outcome.cover_letter_url,
        )
        .await?;
    }

    Ok(Json(JobOptimizeResponse {
        job_id,
        resume_url: outcome.resume_url,
        cover_letter_url: outcome.cover_letter_url,
        cached: outcome.cached,
        document: outcome.document,
    }))
}

/// POST /api/v1/jobs/:id/comparison
///
/// Returns the freshly optimized document synchronously; cover-letter
/// generation continues as a detached tail that persists its URL when done.
/// A missing cover-letter URL afterwards means "not yet ready".
pub async fn handle_generate_comparison(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ComparisonResponse>, AppError> {
    let job = store::fetch_job(&state.db, job_id).await?;
    let resume = store::fetch_resume(&state.db, job.resume_id).await?;

    if resume.raw_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Resume has no extracted text to optimize".to_string(),
        ));
    }

    let input = JobOptimizeInput {
        job_id,
        resume_id: resume.id,
        resume_text: resume.raw_text,
        description: job.description.clone(),
        gap: parse_gap(&job)?,
        existing_resume_url: job.optimized_resume_url.clone(),
        existing_cover_letter_url: job.cover_letter_url.clone(),
    };

    let sink = Arc::new(PgArtifactSink {
        pool: state.db.clone(),
    });
    let document = generate_comparison(&pipeline(&state), sink, input).await?;

    store::save_job_document(&state.db, job_id, &document_value(&document)?).await?;

    Ok(Json(ComparisonResponse { job_id, document }))
}

/// POST /api/v1/resumes/:id/optimize
///
/// Plain resume optimization — no target posting, no cover letter.
pub async fn handle_optimize_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Json(request): Json<OptimizeResumeRequest>,
) -> Result<Json<ResumeOptimizeResponse>, AppError> {
    let resume = store::fetch_resume(&state.db, resume_id).await?;

    if resume.raw_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Resume has no extracted text to optimize".to_string(),
        ));
    }

    let input = ResumeOptimizeInput {
        resume_id,
        resume_text: resume.raw_text,
        gap: request.gap_analysis,
        existing_resume_url: resume.optimized_resume_url.clone(),
    };

    let outcome = optimize_resume(&pipeline(&state), &input).await?;

    if let Some(document) = &outcome.document {
        store::save_resume_results(
            &state.db,
            resume_id,
            &document_value(document)?,
            &outcome.resume_url,
        )
        .await?;
    }

    Ok(Json(ResumeOptimizeResponse {
        resume_id,
        resume_url: outcome.resume_url,
        cached: outcome.cached,
        document: outcome.document,
    }))
}
