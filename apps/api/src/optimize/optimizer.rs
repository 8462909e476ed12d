//! Section Optimizer — Wave 1 of the pipeline.
//!
//! One free-text LLM call per optimizable section. Calls are independent: a
//! gateway failure propagates out of that call only; the wave-join policy
//! (fail-fast vs settle) belongs to the assembler.

use crate::errors::AppError;
use crate::llm_client::LlmGateway;
use crate::models::gap::GapAnalysis;
use crate::models::suggestion::Suggestion;
use crate::optimize::prompts::PromptCatalog;

/// What drives the rewrite. Exactly one of these shapes exists per request.
#[derive(Debug, Clone, Copy)]
pub enum SectionContext<'a> {
    /// Full job-targeted optimization.
    Job {
        description: &'a str,
        gap: Option<&'a GapAnalysis>,
    },
    /// Plain quality/ATS improvement, no target posting.
    General { gap: Option<&'a GapAnalysis> },
    /// Apply an accepted suggestion subset. `current` is the baseline text
    /// (seeded from the first suggestion's target).
    Suggestions {
        current: &'a str,
        accepted: &'a [Suggestion],
    },
}

/// Rewrites one section of the resume. `resume_text` is always the full
/// original text — the model sees the whole document for context even when
/// rewriting a single section.
pub async fn optimize_section(
    llm: &dyn LlmGateway,
    prompts: &PromptCatalog,
    section: &str,
    resume_text: &str,
    ctx: &SectionContext<'_>,
) -> Result<String, AppError> {
    let prompt = match ctx {
        SectionContext::Job { description, gap } => {
            prompts.optimize_job_prompt(section, resume_text, description, &gap_json(*gap)?)
        }
        SectionContext::General { gap } => {
            prompts.optimize_general_prompt(section, resume_text, &gap_json(*gap)?)
        }
        SectionContext::Suggestions { current, accepted } => {
            let suggestions_json = serde_json::to_string_pretty(accepted).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to serialize suggestions: {e}"))
            })?;
            prompts.optimize_suggestions_prompt(section, current, &suggestions_json)
        }
    };

    llm.call(&prompt, &prompts.optimize_system)
        .await
        .map_err(|e| AppError::Llm(format!("{section} optimization failed: {e}")))
}

fn gap_json(gap: Option<&GapAnalysis>) -> Result<String, AppError> {
    match gap {
        Some(g) => serde_json::to_string_pretty(g).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to serialize gap analysis: {e}"))
        }),
        None => Ok("(no gap analysis available)".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gap::GapSkills;
    use crate::models::suggestion::{SuggestionKind, SuggestionSection, SuggestionTarget};
    use crate::optimize::test_stubs::StubGateway;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_job_context_prompt_carries_gap_and_description() {
        let llm = StubGateway::echo();
        let prompts = PromptCatalog::default();
        let gap = GapAnalysis {
            skills: GapSkills {
                missing_skills: vec!["Kubernetes".to_string()],
                matched_skills: vec![],
            },
            ..Default::default()
        };
        let ctx = SectionContext::Job {
            description: "Senior Python Engineer",
            gap: Some(&gap),
        };

        let out = optimize_section(&llm, &prompts, "skills", "Jane Doe, 5 years Python", &ctx)
            .await
            .unwrap();

        // Echo stub returns the prompt: the rewrite input must carry the
        // posting, the gap findings, and the full resume.
        assert!(out.contains("Senior Python Engineer"));
        assert!(out.contains("Kubernetes"));
        assert!(out.contains("Jane Doe, 5 years Python"));
    }

    #[tokio::test]
    async fn test_missing_gap_analysis_does_not_fail() {
        let llm = StubGateway::echo();
        let prompts = PromptCatalog::default();
        let ctx = SectionContext::General { gap: None };

        let out = optimize_section(&llm, &prompts, "summary", "resume text", &ctx)
            .await
            .unwrap();
        assert!(out.contains("no gap analysis available"));
    }

    #[tokio::test]
    async fn test_suggestions_context_seeds_current_text() {
        let llm = StubGateway::echo();
        let prompts = PromptCatalog::default();
        let accepted = vec![Suggestion {
            id: Uuid::new_v4(),
            section: SuggestionSection::Summary,
            kind: SuggestionKind::Rewrite,
            target: SuggestionTarget {
                field: "summary".to_string(),
                current: "Old summary text".to_string(),
            },
            proposed: "Stronger summary".to_string(),
            preview: "Rewrite the summary".to_string(),
        }];
        let ctx = SectionContext::Suggestions {
            current: &accepted[0].target.current,
            accepted: &accepted,
        };

        let out = optimize_section(&llm, &prompts, "summary", "full resume", &ctx)
            .await
            .unwrap();
        assert!(out.contains("Old summary text"));
        assert!(out.contains("Stronger summary"));
    }

    #[tokio::test]
    async fn test_gateway_failure_propagates() {
        let llm = StubGateway::failing("quota exhausted");
        let prompts = PromptCatalog::default();
        let ctx = SectionContext::General { gap: None };

        let result = optimize_section(&llm, &prompts, "projects", "resume", &ctx).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
