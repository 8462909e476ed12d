//! Cover letter content generation — one structured LLM call grounded in the
//! optimized document and the target posting.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, LlmGateway};
use crate::models::document::ResumeDocument;
use crate::optimize::prompts::PromptCatalog;
use crate::optimize::schemas::cover_letter_schema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverLetter {
    #[serde(default)]
    pub opening: String,
    #[serde(default)]
    pub body: Vec<String>,
    #[serde(default)]
    pub closing: String,
}

pub async fn generate_cover_letter(
    llm: &dyn LlmGateway,
    prompts: &PromptCatalog,
    document: &ResumeDocument,
    job_description: &str,
) -> Result<CoverLetter, AppError> {
    let document_json = serde_json::to_string_pretty(document)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize document: {e}")))?;

    let prompt = prompts.cover_letter_prompt(&document_json, job_description);
    let schema = cover_letter_schema();

    let text = llm
        .call_structured(
            &prompt,
            &prompts.cover_letter_system,
            "record_cover_letter",
            &schema,
        )
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))?;

    serde_json::from_str(strip_json_fences(&text))
        .map_err(|e| AppError::Llm(format!("Cover letter unparseable: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::test_stubs::StubGateway;

    #[tokio::test]
    async fn test_cover_letter_prompt_carries_document_and_posting() {
        let llm = StubGateway::new(
            |_| unreachable!(),
            |_, prompt| {
                assert!(prompt.contains("Jane Doe"));
                assert!(prompt.contains("Senior Python Engineer"));
                Ok(r#"{"opening": "Dear team", "body": ["Evidence."], "closing": "Sincerely"}"#
                    .to_string())
            },
        );
        let prompts = PromptCatalog::default();
        let doc = ResumeDocument {
            name: "Jane Doe".to_string(),
            ..Default::default()
        };

        let letter = generate_cover_letter(&llm, &prompts, &doc, "Senior Python Engineer")
            .await
            .unwrap();
        assert_eq!(letter.opening, "Dear team");
        assert_eq!(letter.body.len(), 1);
    }
}
