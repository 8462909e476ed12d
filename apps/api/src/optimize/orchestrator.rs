//! Optimization Orchestrator — selects which pipeline variant runs and drives
//! the artifact tail.
//!
//! Three synchronous variants (job-targeted, suggestion-scoped, plain) plus
//! the comparison entry point whose cover-letter tail runs detached after the
//! response has been returned. Artifact URLs double as the idempotency
//! markers: a repeat request for a job whose two URLs already exist is served
//! from cache without any gateway, render, or upload call.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::artifacts::cover_letter::generate_cover_letter;
use crate::artifacts::html::{cover_letter_html, resume_html};
use crate::artifacts::render::PdfRenderer;
use crate::artifacts::storage::ObjectStorage;
use crate::errors::AppError;
use crate::llm_client::LlmGateway;
use crate::models::document::ResumeDocument;
use crate::models::gap::GapAnalysis;
use crate::models::suggestion::Suggestion;
use crate::optimize::assembler::{assemble_for_context, assemble_with_suggestions};
use crate::optimize::optimizer::SectionContext;
use crate::optimize::prompts::PromptCatalog;
use crate::suggestions::grouping::group_by_section;
use crate::tasks::run_detached;

const PDF_MIME: &str = "application/pdf";

/// Where the detached tail persists its result. The HTTP layer backs this
/// with the jobs table; tests use a recording stub.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn save_cover_letter_url(&self, job_id: Uuid, url: &str) -> Result<(), AppError>;
}

/// The orchestrator's collaborators, bundled so handlers build one value per
/// request and tests swap any seam independently.
#[derive(Clone)]
pub struct Pipeline {
    pub llm: Arc<dyn LlmGateway>,
    pub renderer: Arc<dyn PdfRenderer>,
    pub storage: Arc<dyn ObjectStorage>,
    pub prompts: Arc<PromptCatalog>,
    /// Policy for the comparison tail: regenerate a cover letter even when
    /// one is already stored. Default false (skip).
    pub regenerate_cover_letters: bool,
}

pub struct JobOptimizeInput {
    pub job_id: Uuid,
    pub resume_id: Uuid,
    pub resume_text: String,
    pub description: String,
    pub gap: Option<GapAnalysis>,
    pub existing_resume_url: Option<String>,
    pub existing_cover_letter_url: Option<String>,
}

pub struct JobOptimizeOutcome {
    /// None on a cache hit — nothing was recomputed.
    pub document: Option<ResumeDocument>,
    pub resume_url: String,
    pub cover_letter_url: String,
    pub cached: bool,
}

pub struct ResumeOptimizeInput {
    pub resume_id: Uuid,
    pub resume_text: String,
    pub gap: Option<GapAnalysis>,
    pub existing_resume_url: Option<String>,
}

pub struct ResumeOptimizeOutcome {
    pub document: Option<ResumeDocument>,
    pub resume_url: String,
    pub cached: bool,
}

/// Full job-based optimization with synchronous artifact generation.
/// Artifact failures here are hard failures of the whole request.
pub async fn optimize_for_job(
    p: &Pipeline,
    input: &JobOptimizeInput,
) -> Result<JobOptimizeOutcome, AppError> {
    if let (Some(resume_url), Some(cover_letter_url)) = (
        input.existing_resume_url.as_ref(),
        input.existing_cover_letter_url.as_ref(),
    ) {
        info!(job_id = %input.job_id, "both artifacts already exist, serving cached URLs");
        return Ok(JobOptimizeOutcome {
            document: None,
            resume_url: resume_url.clone(),
            cover_letter_url: cover_letter_url.clone(),
            cached: true,
        });
    }

    let ctx = SectionContext::Job {
        description: &input.description,
        gap: input.gap.as_ref(),
    };
    let document =
        assemble_for_context(p.llm.as_ref(), &p.prompts, &input.resume_text, &ctx).await?;

    let resume_url = upload_resume_pdf(p, &document, &resume_key(input.job_id)).await?;

    let letter =
        generate_cover_letter(p.llm.as_ref(), &p.prompts, &document, &input.description).await?;
    let letter_pdf = p.renderer.render(&cover_letter_html(&letter, &document)).await?;
    let cover_letter_url = p
        .storage
        .upload(letter_pdf, &cover_letter_key(input.job_id), PDF_MIME)
        .await?;

    info!(job_id = %input.job_id, "job optimization complete with both artifacts");
    Ok(JobOptimizeOutcome {
        document: Some(document),
        resume_url,
        cover_letter_url,
        cached: false,
    })
}

/// Suggestion-scoped optimization: only the sections with accepted
/// suggestions are rewritten. Returns the merged document; no artifact tail.
pub async fn optimize_with_suggestions(
    p: &Pipeline,
    resume_text: &str,
    accepted: Vec<Suggestion>,
) -> Result<ResumeDocument, AppError> {
    if accepted.is_empty() {
        return Err(AppError::Validation(
            "No accepted suggestions to apply".to_string(),
        ));
    }
    let grouped = group_by_section(accepted);
    assemble_with_suggestions(p.llm.as_ref(), &p.prompts, resume_text, &grouped).await
}

/// Plain resume optimization — no target posting, no cover letter.
pub async fn optimize_resume(
    p: &Pipeline,
    input: &ResumeOptimizeInput,
) -> Result<ResumeOptimizeOutcome, AppError> {
    if let Some(resume_url) = input.existing_resume_url.as_ref() {
        info!(resume_id = %input.resume_id, "optimized artifact already exists, serving cached URL");
        return Ok(ResumeOptimizeOutcome {
            document: None,
            resume_url: resume_url.clone(),
            cached: true,
        });
    }

    let ctx = SectionContext::General {
        gap: input.gap.as_ref(),
    };
    let document =
        assemble_for_context(p.llm.as_ref(), &p.prompts, &input.resume_text, &ctx).await?;

    let key = format!("resumes/{}/resume.pdf", input.resume_id);
    let resume_url = upload_resume_pdf(p, &document, &key).await?;

    Ok(ResumeOptimizeOutcome {
        document: Some(document),
        resume_url,
        cached: false,
    })
}

/// Comparison generation: the optimized document is computed and returned
/// synchronously; the cover-letter tail runs detached and persists through
/// `sink`. Tail failures are logged and dropped — the caller has already
/// received its response. A missing cover-letter URL afterwards means "not
/// yet ready", not an error.
pub async fn generate_comparison(
    p: &Pipeline,
    sink: Arc<dyn ArtifactSink>,
    input: JobOptimizeInput,
) -> Result<ResumeDocument, AppError> {
    let ctx = SectionContext::Job {
        description: &input.description,
        gap: input.gap.as_ref(),
    };
    let document =
        assemble_for_context(p.llm.as_ref(), &p.prompts, &input.resume_text, &ctx).await?;

    if should_run_cover_letter_tail(
        input.existing_cover_letter_url.as_deref(),
        p.regenerate_cover_letters,
    ) {
        let p = p.clone();
        let doc = document.clone();
        let job_id = input.job_id;
        let resume_id = input.resume_id;
        let description = input.description;
        run_detached("cover-letter", job_id, resume_id, async move {
            cover_letter_tail(&p, sink.as_ref(), job_id, &doc, &description).await
        });
    } else {
        info!(job_id = %input.job_id, "cover letter already stored, skipping detached tail");
    }

    Ok(document)
}

/// Tail policy: run unless a cover letter already exists, overridable by
/// configuration.
pub fn should_run_cover_letter_tail(existing_url: Option<&str>, regenerate: bool) -> bool {
    regenerate || existing_url.is_none()
}

/// The detached continuation body: content → HTML → PDF → upload → persist.
pub async fn cover_letter_tail(
    p: &Pipeline,
    sink: &dyn ArtifactSink,
    job_id: Uuid,
    document: &ResumeDocument,
    description: &str,
) -> Result<(), AppError> {
    let letter = generate_cover_letter(p.llm.as_ref(), &p.prompts, document, description).await?;
    let pdf = p.renderer.render(&cover_letter_html(&letter, document)).await?;
    let url = p
        .storage
        .upload(pdf, &cover_letter_key(job_id), PDF_MIME)
        .await?;
    sink.save_cover_letter_url(job_id, &url).await
}

async fn upload_resume_pdf(
    p: &Pipeline,
    document: &ResumeDocument,
    key: &str,
) -> Result<String, AppError> {
    let pdf = p.renderer.render(&resume_html(document)).await?;
    p.storage.upload(pdf, key, PDF_MIME).await
}

fn resume_key(job_id: Uuid) -> String {
    format!("jobs/{job_id}/resume.pdf")
}

fn cover_letter_key(job_id: Uuid) -> String {
    format!("jobs/{job_id}/cover-letter.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::test_stubs::{StubGateway, StubRenderer, StubSink, StubStorage};

    const RESUME: &str = "Jane Doe, jane@doe.dev, 5 years Python at Acme";

    fn canned_gateway() -> StubGateway {
        StubGateway::new(
            |prompt| Ok(prompt.to_string()),
            |schema_name, _| match schema_name {
                "record_personal_info" => Ok(
                    r#"{"personal_info": {"name": "Jane Doe", "email": "jane@doe.dev",
                        "phone": "", "linkedin": "", "location": ""}}"#
                        .to_string(),
                ),
                "record_summary" => Ok(r#"{"summary": "Seasoned Python engineer"}"#.to_string()),
                "record_cover_letter" => Ok(
                    r#"{"opening": "Dear team", "body": ["Evidence."], "closing": "Sincerely"}"#
                        .to_string(),
                ),
                _ => Ok("{}".to_string()),
            },
        )
    }

    struct Fixture {
        llm: Arc<StubGateway>,
        renderer: Arc<StubRenderer>,
        storage: Arc<StubStorage>,
        pipeline: Pipeline,
    }

    fn fixture(llm: StubGateway, regenerate: bool) -> Fixture {
        let llm = Arc::new(llm);
        let renderer = Arc::new(StubRenderer::ok());
        let storage = Arc::new(StubStorage::new());
        let pipeline = Pipeline {
            llm: llm.clone(),
            renderer: renderer.clone(),
            storage: storage.clone(),
            prompts: Arc::new(PromptCatalog::default()),
            regenerate_cover_letters: regenerate,
        };
        Fixture {
            llm,
            renderer,
            storage,
            pipeline,
        }
    }

    fn job_input(job_id: Uuid) -> JobOptimizeInput {
        JobOptimizeInput {
            job_id,
            resume_id: Uuid::new_v4(),
            resume_text: RESUME.to_string(),
            description: "Senior Python Engineer".to_string(),
            gap: None,
            existing_resume_url: None,
            existing_cover_letter_url: None,
        }
    }

    #[tokio::test]
    async fn test_repeat_job_optimization_is_served_from_cache() {
        // Both URLs already stored: no gateway, render, or upload call.
        let f = fixture(StubGateway::failing("must not be called"), false);
        let mut input = job_input(Uuid::new_v4());
        input.existing_resume_url = Some("https://cdn.test/jobs/x/resume.pdf".to_string());
        input.existing_cover_letter_url =
            Some("https://cdn.test/jobs/x/cover-letter.pdf".to_string());

        let outcome = optimize_for_job(&f.pipeline, &input).await.unwrap();

        assert!(outcome.cached);
        assert!(outcome.document.is_none());
        assert_eq!(outcome.resume_url, "https://cdn.test/jobs/x/resume.pdf");
        assert_eq!(
            outcome.cover_letter_url,
            "https://cdn.test/jobs/x/cover-letter.pdf"
        );
        assert_eq!(f.llm.total_calls(), 0);
        assert_eq!(f.renderer.render_calls(), 0);
        assert_eq!(f.storage.upload_calls(), 0);
    }

    #[tokio::test]
    async fn test_partial_artifacts_do_not_count_as_a_cache_hit() {
        let f = fixture(canned_gateway(), false);
        let mut input = job_input(Uuid::new_v4());
        input.existing_resume_url = Some("https://cdn.test/jobs/x/resume.pdf".to_string());
        // cover letter URL absent → full re-run

        let outcome = optimize_for_job(&f.pipeline, &input).await.unwrap();
        assert!(!outcome.cached);
        assert!(outcome.document.is_some());
        assert_eq!(f.storage.upload_calls(), 2);
    }

    #[tokio::test]
    async fn test_job_optimization_produces_both_artifacts() {
        let job_id = Uuid::new_v4();
        let f = fixture(canned_gateway(), false);

        let outcome = optimize_for_job(&f.pipeline, &job_input(job_id)).await.unwrap();

        assert!(!outcome.cached);
        let doc = outcome.document.unwrap();
        assert_eq!(doc.name, "Jane Doe");
        assert_eq!(doc.summary, "Seasoned Python engineer");
        assert_eq!(outcome.resume_url, format!("https://cdn.test/jobs/{job_id}/resume.pdf"));
        assert_eq!(
            outcome.cover_letter_url,
            format!("https://cdn.test/jobs/{job_id}/cover-letter.pdf")
        );
        assert_eq!(f.renderer.render_calls(), 2);
    }

    #[tokio::test]
    async fn test_render_failure_is_a_hard_failure_on_the_synchronous_path() {
        let llm = Arc::new(canned_gateway());
        let pipeline = Pipeline {
            llm: llm.clone(),
            renderer: Arc::new(StubRenderer::failing()),
            storage: Arc::new(StubStorage::new()),
            prompts: Arc::new(PromptCatalog::default()),
            regenerate_cover_letters: false,
        };

        let result = optimize_for_job(&pipeline, &job_input(Uuid::new_v4())).await;
        assert!(matches!(result, Err(AppError::Render(_))));
    }

    #[tokio::test]
    async fn test_apply_with_no_accepted_suggestions_is_a_validation_error() {
        let f = fixture(canned_gateway(), false);
        let result = optimize_with_suggestions(&f.pipeline, RESUME, vec![]).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(f.llm.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_plain_resume_optimization_reuses_existing_artifact() {
        let f = fixture(StubGateway::failing("must not be called"), false);
        let input = ResumeOptimizeInput {
            resume_id: Uuid::new_v4(),
            resume_text: RESUME.to_string(),
            gap: None,
            existing_resume_url: Some("https://cdn.test/resumes/x/resume.pdf".to_string()),
        };

        let outcome = optimize_resume(&f.pipeline, &input).await.unwrap();
        assert!(outcome.cached);
        assert_eq!(f.llm.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_comparison_skips_tail_when_cover_letter_exists() {
        let f = fixture(canned_gateway(), false);
        let sink = Arc::new(StubSink::new());
        let mut input = job_input(Uuid::new_v4());
        input.existing_cover_letter_url =
            Some("https://cdn.test/jobs/x/cover-letter.pdf".to_string());

        let document = generate_comparison(&f.pipeline, sink.clone(), input)
            .await
            .unwrap();

        // The synchronous portion still computed a fresh document...
        assert_eq!(document.name, "Jane Doe");
        assert_eq!(f.llm.total_calls(), 13); // 5 rewrites + 8 formats
        // ...but no tail work was spawned.
        assert_eq!(f.renderer.render_calls(), 0);
        assert_eq!(f.storage.upload_calls(), 0);
        assert!(sink.saved_urls().is_empty());
    }

    #[tokio::test]
    async fn test_comparison_spawns_tail_when_no_cover_letter_exists() {
        let job_id = Uuid::new_v4();
        let f = fixture(canned_gateway(), false);
        let sink = Arc::new(StubSink::new());

        let document = generate_comparison(&f.pipeline, sink.clone(), job_input(job_id))
            .await
            .unwrap();
        assert_eq!(document.summary, "Seasoned Python engineer");

        // Stub collaborators never actually suspend, so a few yields let the
        // detached task run to completion on the test runtime.
        for _ in 0..50 {
            if !sink.saved_urls().is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
        let saved = sink.saved_urls();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, job_id);
        assert_eq!(
            saved[0].1,
            format!("https://cdn.test/jobs/{job_id}/cover-letter.pdf")
        );
    }

    #[tokio::test]
    async fn test_tail_failure_is_swallowed_after_logging() {
        // The tail itself returns the error; run_detached drops it. Verified
        // here at the tail boundary: the sink is never written on failure.
        let llm = Arc::new(canned_gateway());
        let pipeline = Pipeline {
            llm,
            renderer: Arc::new(StubRenderer::failing()),
            storage: Arc::new(StubStorage::new()),
            prompts: Arc::new(PromptCatalog::default()),
            regenerate_cover_letters: false,
        };
        let sink = StubSink::new();
        let doc = ResumeDocument::default();

        let result =
            cover_letter_tail(&pipeline, &sink, Uuid::new_v4(), &doc, "Some role").await;
        assert!(matches!(result, Err(AppError::Render(_))));
        assert!(sink.saved_urls().is_empty());
    }

    #[test]
    fn test_tail_policy_matrix() {
        assert!(should_run_cover_letter_tail(None, false));
        assert!(should_run_cover_letter_tail(None, true));
        assert!(!should_run_cover_letter_tail(Some("url"), false));
        assert!(should_run_cover_letter_tail(Some("url"), true));
    }
}
