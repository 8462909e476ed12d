//! Bulk suggestion generation — one structured LLM call against the resume
//! and its gap analysis. Ids are minted server-side; the model only produces
//! the suggestion content.

use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, LlmGateway};
use crate::models::gap::GapAnalysis;
use crate::models::suggestion::{Suggestion, SuggestionKind, SuggestionSection, SuggestionTarget};
use crate::optimize::prompts::PromptCatalog;
use crate::optimize::schemas::suggestions_schema;

#[derive(Debug, Deserialize)]
struct SuggestionBatch {
    #[serde(default)]
    suggestions: Vec<RawSuggestion>,
}

/// The model-facing shape: a suggestion without an id.
#[derive(Debug, Deserialize)]
struct RawSuggestion {
    section: SuggestionSection,
    kind: SuggestionKind,
    #[serde(default)]
    target: SuggestionTarget,
    #[serde(default)]
    proposed: String,
    #[serde(default)]
    preview: String,
}

pub async fn generate_suggestions(
    llm: &dyn LlmGateway,
    prompts: &PromptCatalog,
    resume_text: &str,
    gap: Option<&GapAnalysis>,
) -> Result<Vec<Suggestion>, AppError> {
    let gap_json = match gap {
        Some(g) => serde_json::to_string_pretty(g).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to serialize gap analysis: {e}"))
        })?,
        None => "(no gap analysis available)".to_string(),
    };

    let prompt = prompts.suggestions_prompt(resume_text, &gap_json);
    let schema = suggestions_schema();

    let text = llm
        .call_structured(
            &prompt,
            &prompts.suggestions_system,
            "record_suggestions",
            &schema,
        )
        .await
        .map_err(|e| AppError::Llm(format!("Suggestion generation failed: {e}")))?;

    let batch: SuggestionBatch = serde_json::from_str(strip_json_fences(&text))
        .map_err(|e| AppError::Llm(format!("Suggestion batch unparseable: {e}")))?;

    Ok(batch
        .suggestions
        .into_iter()
        .map(|raw| Suggestion {
            id: Uuid::new_v4(),
            section: raw.section,
            kind: raw.kind,
            target: raw.target,
            proposed: raw.proposed,
            preview: raw.preview,
        })
        .collect())
}
