//! Persistence access for jobs, resumes, and suggestions.
//!
//! Kept deliberately key-value shaped: fetch one record by id, write back a
//! few columns. Artifact-URL updates are last-write-wins — concurrent
//! duplicate optimizations for the same id are tolerated, not locked.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobRow, ResumeRow};
use crate::models::suggestion::{Suggestion, SuggestionRow};
use crate::optimize::orchestrator::ArtifactSink;

pub async fn fetch_job(pool: &PgPool, job_id: Uuid) -> Result<JobRow, AppError> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

pub async fn fetch_resume(pool: &PgPool, resume_id: Uuid) -> Result<ResumeRow, AppError> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))
}

/// Stores the full result of a job optimization: document plus both URLs.
pub async fn save_job_results(
    pool: &PgPool,
    job_id: Uuid,
    document: &Value,
    resume_url: &str,
    cover_letter_url: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE jobs
        SET optimized_document = $2,
            optimized_resume_url = $3,
            cover_letter_url = $4,
            updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(job_id)
    .bind(document)
    .bind(resume_url)
    .bind(cover_letter_url)
    .execute(pool)
    .await?;
    Ok(())
}

/// Stores only the optimized document (comparison path — URLs may arrive
/// later from the detached tail).
pub async fn save_job_document(
    pool: &PgPool,
    job_id: Uuid,
    document: &Value,
) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE jobs SET optimized_document = $2, updated_at = now() WHERE id = $1",
    )
    .bind(job_id)
    .bind(document)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn save_resume_results(
    pool: &PgPool,
    resume_id: Uuid,
    document: &Value,
    resume_url: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE resumes
        SET optimized_document = $2,
            optimized_resume_url = $3,
            updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(resume_id)
    .bind(document)
    .bind(resume_url)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn insert_suggestions(
    pool: &PgPool,
    job_id: Uuid,
    suggestions: &[Suggestion],
) -> Result<(), AppError> {
    for suggestion in suggestions {
        let payload = serde_json::to_value(suggestion).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to serialize suggestion: {e}"))
        })?;
        sqlx::query(
            r#"
            INSERT INTO suggestions (id, job_id, payload, accepted)
            VALUES ($1, $2, $3, false)
            "#,
        )
        .bind(suggestion.id)
        .bind(job_id)
        .bind(&payload)
        .execute(pool)
        .await?;
    }
    Ok(())
}

/// Loads the accepted subset by id and marks the rows accepted.
pub async fn accept_suggestions(
    pool: &PgPool,
    job_id: Uuid,
    ids: &[Uuid],
) -> Result<Vec<Suggestion>, AppError> {
    let rows = sqlx::query_as::<_, SuggestionRow>(
        "SELECT * FROM suggestions WHERE job_id = $1 AND id = ANY($2)",
    )
    .bind(job_id)
    .bind(ids)
    .fetch_all(pool)
    .await?;

    if rows.len() != ids.len() {
        return Err(AppError::NotFound(format!(
            "{} of {} suggestions not found for job {job_id}",
            ids.len() - rows.len(),
            ids.len()
        )));
    }

    sqlx::query("UPDATE suggestions SET accepted = true WHERE job_id = $1 AND id = ANY($2)")
        .bind(job_id)
        .bind(ids)
        .execute(pool)
        .await?;

    rows.into_iter()
        .map(|row| {
            row.into_suggestion().map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Stored suggestion unparseable: {e}"))
            })
        })
        .collect()
}

/// Backs the detached cover-letter tail with the jobs table.
pub struct PgArtifactSink {
    pub pool: PgPool,
}

#[async_trait]
impl ArtifactSink for PgArtifactSink {
    async fn save_cover_letter_url(&self, job_id: Uuid, url: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE jobs SET cover_letter_url = $2, updated_at = now() WHERE id = $1",
        )
        .bind(job_id)
        .bind(url)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
