//! Section Formatter — Wave 2 of the pipeline.
//!
//! One structured LLM call per document region, constrained to the region's
//! wrapper schema, parsed into a tagged union. The merge step (assembler) is
//! a total match over the eight kinds, so a new section cannot be added
//! without the compiler pointing at every site that must handle it.

use serde::Deserialize;

use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, LlmGateway};
use crate::models::document::{
    AchievementEntry, AwardEntry, CertificationEntry, EducationEntry, ExperienceEntry,
    PersonalInfo, ProjectEntry, SkillGroup,
};
use crate::optimize::prompts::PromptCatalog;
use crate::optimize::schemas::schema_for;
use crate::optimize::sections::FormatKind;

/// One formatter result, unwrapped from its wrapper object.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionFormatResult {
    PersonalInfo(PersonalInfo),
    Summary(String),
    Skills(Vec<SkillGroup>),
    Experience(Vec<ExperienceEntry>),
    Projects(Vec<ProjectEntry>),
    Education(Vec<EducationEntry>),
    AchievementsAwards {
        achievements: Vec<AchievementEntry>,
        awards: Vec<AwardEntry>,
    },
    Certifications(Vec<CertificationEntry>),
}

impl SectionFormatResult {
    /// The empty default for a kind — what a failed or unparseable Wave-2
    /// call degrades to at the assembler boundary.
    pub fn empty(kind: FormatKind) -> Self {
        match kind {
            FormatKind::PersonalInfo => SectionFormatResult::PersonalInfo(PersonalInfo::default()),
            FormatKind::Summary => SectionFormatResult::Summary(String::new()),
            FormatKind::Skills => SectionFormatResult::Skills(Vec::new()),
            FormatKind::Experience => SectionFormatResult::Experience(Vec::new()),
            FormatKind::Projects => SectionFormatResult::Projects(Vec::new()),
            FormatKind::Education => SectionFormatResult::Education(Vec::new()),
            FormatKind::AchievementsAwards => SectionFormatResult::AchievementsAwards {
                achievements: Vec::new(),
                awards: Vec::new(),
            },
            FormatKind::Certifications => SectionFormatResult::Certifications(Vec::new()),
        }
    }
}

// Wrapper shapes, one per schema. `#[serde(default)]` on the single key means
// a bare `{}` from the gateway parses to the empty default rather than
// erroring — only genuinely malformed JSON fails.

#[derive(Debug, Default, Deserialize)]
struct PersonalInfoWrapper {
    #[serde(default)]
    personal_info: PersonalInfo,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryWrapper {
    #[serde(default)]
    summary: String,
}

#[derive(Debug, Default, Deserialize)]
struct SkillsWrapper {
    #[serde(default)]
    skills: Vec<SkillGroup>,
}

#[derive(Debug, Default, Deserialize)]
struct ExperienceWrapper {
    #[serde(default)]
    experience: Vec<ExperienceEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectsWrapper {
    #[serde(default)]
    projects: Vec<ProjectEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct EducationWrapper {
    #[serde(default)]
    education: Vec<EducationEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct AchievementsAwardsWrapper {
    #[serde(default)]
    achievements: Vec<AchievementEntry>,
    #[serde(default)]
    awards: Vec<AwardEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct CertificationsWrapper {
    #[serde(default)]
    certifications: Vec<CertificationEntry>,
}

/// Formats one section. `input` is either Wave-1 optimized text or, for the
/// factual kinds (personal info, education, certifications), the original
/// resume text.
pub async fn format_section(
    llm: &dyn LlmGateway,
    prompts: &PromptCatalog,
    kind: FormatKind,
    input: &str,
) -> Result<SectionFormatResult, AppError> {
    let prompt = prompts.format_prompt(kind.name(), input);
    let schema = schema_for(kind);

    let text = llm
        .call_structured(&prompt, &prompts.format_system, kind.schema_name(), &schema)
        .await
        .map_err(|e| AppError::Llm(format!("{} formatting failed: {e}", kind.name())))?;

    parse_result(kind, &text)
}

/// Parses a wrapper JSON string into the kind's tagged result. A missing
/// wrapper key yields the empty default; malformed JSON is an error for the
/// assembler to settle.
pub fn parse_result(kind: FormatKind, text: &str) -> Result<SectionFormatResult, AppError> {
    let text = strip_json_fences(text);
    let parse_err =
        |e: serde_json::Error| AppError::Llm(format!("{} result unparseable: {e}", kind.name()));

    Ok(match kind {
        FormatKind::PersonalInfo => {
            let w: PersonalInfoWrapper = serde_json::from_str(text).map_err(parse_err)?;
            SectionFormatResult::PersonalInfo(w.personal_info)
        }
        FormatKind::Summary => {
            let w: SummaryWrapper = serde_json::from_str(text).map_err(parse_err)?;
            SectionFormatResult::Summary(w.summary)
        }
        FormatKind::Skills => {
            let w: SkillsWrapper = serde_json::from_str(text).map_err(parse_err)?;
            SectionFormatResult::Skills(w.skills)
        }
        FormatKind::Experience => {
            let w: ExperienceWrapper = serde_json::from_str(text).map_err(parse_err)?;
            SectionFormatResult::Experience(w.experience)
        }
        FormatKind::Projects => {
            let w: ProjectsWrapper = serde_json::from_str(text).map_err(parse_err)?;
            SectionFormatResult::Projects(w.projects)
        }
        FormatKind::Education => {
            let w: EducationWrapper = serde_json::from_str(text).map_err(parse_err)?;
            SectionFormatResult::Education(w.education)
        }
        FormatKind::AchievementsAwards => {
            let w: AchievementsAwardsWrapper = serde_json::from_str(text).map_err(parse_err)?;
            SectionFormatResult::AchievementsAwards {
                achievements: w.achievements,
                awards: w.awards,
            }
        }
        FormatKind::Certifications => {
            let w: CertificationsWrapper = serde_json::from_str(text).map_err(parse_err)?;
            SectionFormatResult::Certifications(w.certifications)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_wrapper_unwraps_exactly() {
        let text = r#"{"skills": [
            {"category": "Languages", "skills": ["Python", "Rust", "Go"]},
            {"category": "Infra", "skills": ["Kubernetes"]}
        ]}"#;
        let result = parse_result(FormatKind::Skills, text).unwrap();
        match result {
            SectionFormatResult::Skills(groups) => {
                assert_eq!(groups.len(), 2);
                assert_eq!(groups[0].skills, vec!["Python", "Rust", "Go"]);
                assert_eq!(groups[1].category, "Infra");
            }
            other => panic!("expected Skills, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_object_parses_to_empty_default() {
        for kind in [
            FormatKind::PersonalInfo,
            FormatKind::Summary,
            FormatKind::Skills,
            FormatKind::Experience,
            FormatKind::Projects,
            FormatKind::Education,
            FormatKind::AchievementsAwards,
            FormatKind::Certifications,
        ] {
            let result = parse_result(kind, "{}").unwrap();
            assert_eq!(result, SectionFormatResult::empty(kind), "{kind:?}");
        }
    }

    #[test]
    fn test_malformed_json_is_an_error_not_a_panic() {
        let result = parse_result(FormatKind::Experience, "not json at all");
        assert!(matches!(result, Err(AppError::Llm(_))));
    }

    #[test]
    fn test_fenced_json_still_parses() {
        let text = "```json\n{\"summary\": \"Seasoned engineer\"}\n```";
        let result = parse_result(FormatKind::Summary, text).unwrap();
        assert_eq!(
            result,
            SectionFormatResult::Summary("Seasoned engineer".to_string())
        );
    }

    #[test]
    fn test_combined_wrapper_carries_both_lists() {
        let text = r#"{
            "achievements": [{"title": "Shipped v2", "description": "", "date": "2024"}],
            "awards": [{"title": "Employee of the year", "issuer": "Acme", "date": "2023"}]
        }"#;
        let result = parse_result(FormatKind::AchievementsAwards, text).unwrap();
        match result {
            SectionFormatResult::AchievementsAwards {
                achievements,
                awards,
            } => {
                assert_eq!(achievements.len(), 1);
                assert_eq!(awards[0].issuer, "Acme");
            }
            other => panic!("expected AchievementsAwards, got {other:?}"),
        }
    }
}
