//! Document Assembler — runs the two waves and merges.
//!
//! Wave 1 (optimize) is all-or-nothing: the five rewrite calls are joined
//! with `try_join!`, so the first rejection aborts the whole attempt and no
//! partial document ever escapes. Wave 2 (format) is joined with `join!` and
//! settled per slot: by that point losing one section to an empty default is
//! cheaper than discarding the already-paid-for Wave-1 work. The two
//! policies are intentionally different — do not unify them.

use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::LlmGateway;
use crate::models::document::ResumeDocument;
use crate::optimize::formatter::{format_section, SectionFormatResult};
use crate::optimize::optimizer::{optimize_section, SectionContext};
use crate::optimize::prompts::PromptCatalog;
use crate::optimize::sections::{FormatKind, OptimizeSection};
use crate::suggestions::grouping::SectionSuggestions;

/// Inputs to the eight Wave-2 formatter calls. Factual kinds (personal info,
/// education, certifications) read the original resume text in the job and
/// general variants; the rest read Wave-1 output.
struct FormatInputs<'a> {
    personal: &'a str,
    summary: &'a str,
    skills: &'a str,
    experience: &'a str,
    projects: &'a str,
    education: &'a str,
    achievements_awards: &'a str,
    certifications: &'a str,
}

/// Runs the full two-wave assembly for the job and general variants.
pub async fn assemble_for_context(
    llm: &dyn LlmGateway,
    prompts: &PromptCatalog,
    resume_text: &str,
    ctx: &SectionContext<'_>,
) -> Result<ResumeDocument, AppError> {
    // Wave 1: five concurrent rewrites, fail-fast.
    let (summary, skills, experience, projects, achievements_awards) = tokio::try_join!(
        optimize_section(
            llm,
            prompts,
            OptimizeSection::Summary.name(),
            resume_text,
            ctx
        ),
        optimize_section(
            llm,
            prompts,
            OptimizeSection::Skills.name(),
            resume_text,
            ctx
        ),
        optimize_section(
            llm,
            prompts,
            OptimizeSection::Experience.name(),
            resume_text,
            ctx
        ),
        optimize_section(
            llm,
            prompts,
            OptimizeSection::Projects.name(),
            resume_text,
            ctx
        ),
        optimize_section(
            llm,
            prompts,
            OptimizeSection::AchievementsAwards.name(),
            resume_text,
            ctx
        ),
    )?;

    let inputs = FormatInputs {
        personal: resume_text,
        summary: &summary,
        skills: &skills,
        experience: &experience,
        projects: &projects,
        education: resume_text,
        achievements_awards: &achievements_awards,
        certifications: resume_text,
    };

    Ok(run_format_wave(llm, prompts, &inputs).await)
}

/// Runs the suggestion-scoped assembly: only sections with at least one
/// accepted suggestion are rewritten (still fail-fast across whichever calls
/// were issued); the rest pass through the formatter unchanged, read from the
/// original resume text.
pub async fn assemble_with_suggestions(
    llm: &dyn LlmGateway,
    prompts: &PromptCatalog,
    resume_text: &str,
    grouped: &SectionSuggestions,
) -> Result<ResumeDocument, AppError> {
    let (summary, skills, experience, projects, achievements, education, certifications) = tokio::try_join!(
        maybe_optimize(llm, prompts, "summary", resume_text, &grouped.summary),
        maybe_optimize(llm, prompts, "skills", resume_text, &grouped.skills),
        maybe_optimize(llm, prompts, "experience", resume_text, &grouped.experience),
        maybe_optimize(llm, prompts, "projects", resume_text, &grouped.projects),
        maybe_optimize(llm, prompts, "achievements", resume_text, &grouped.achievements),
        maybe_optimize(llm, prompts, "education", resume_text, &grouped.education),
        maybe_optimize(
            llm,
            prompts,
            "certifications",
            resume_text,
            &grouped.certifications
        ),
    )?;

    let inputs = FormatInputs {
        personal: resume_text,
        summary: summary.as_deref().unwrap_or(resume_text),
        skills: skills.as_deref().unwrap_or(resume_text),
        experience: experience.as_deref().unwrap_or(resume_text),
        projects: projects.as_deref().unwrap_or(resume_text),
        education: education.as_deref().unwrap_or(resume_text),
        achievements_awards: achievements.as_deref().unwrap_or(resume_text),
        certifications: certifications.as_deref().unwrap_or(resume_text),
    };

    Ok(run_format_wave(llm, prompts, &inputs).await)
}

/// No suggestions for a section means no optimizer call at all — the section
/// is only reformatted from the original text.
async fn maybe_optimize(
    llm: &dyn LlmGateway,
    prompts: &PromptCatalog,
    section: &str,
    resume_text: &str,
    bucket: &[crate::models::suggestion::Suggestion],
) -> Result<Option<String>, AppError> {
    if bucket.is_empty() {
        return Ok(None);
    }
    let ctx = SectionContext::Suggestions {
        current: &bucket[0].target.current,
        accepted: bucket,
    };
    optimize_section(llm, prompts, section, resume_text, &ctx)
        .await
        .map(Some)
}

/// Wave 2: eight concurrent formatter calls, settled per slot, then the
/// total merge. This wave cannot fail — a bad slot becomes its empty default.
async fn run_format_wave(
    llm: &dyn LlmGateway,
    prompts: &PromptCatalog,
    inputs: &FormatInputs<'_>,
) -> ResumeDocument {
    let (personal, summary, skills, experience, projects, education, achievements, certifications) = tokio::join!(
        format_section(llm, prompts, FormatKind::PersonalInfo, inputs.personal),
        format_section(llm, prompts, FormatKind::Summary, inputs.summary),
        format_section(llm, prompts, FormatKind::Skills, inputs.skills),
        format_section(llm, prompts, FormatKind::Experience, inputs.experience),
        format_section(llm, prompts, FormatKind::Projects, inputs.projects),
        format_section(llm, prompts, FormatKind::Education, inputs.education),
        format_section(
            llm,
            prompts,
            FormatKind::AchievementsAwards,
            inputs.achievements_awards
        ),
        format_section(llm, prompts, FormatKind::Certifications, inputs.certifications),
    );

    merge([
        settle(FormatKind::PersonalInfo, personal),
        settle(FormatKind::Summary, summary),
        settle(FormatKind::Skills, skills),
        settle(FormatKind::Experience, experience),
        settle(FormatKind::Projects, projects),
        settle(FormatKind::Education, education),
        settle(FormatKind::AchievementsAwards, achievements),
        settle(FormatKind::Certifications, certifications),
    ])
}

fn settle(
    kind: FormatKind,
    result: Result<SectionFormatResult, AppError>,
) -> SectionFormatResult {
    match result {
        Ok(r) => r,
        Err(e) => {
            warn!("{} format degraded to empty default: {e}", kind.name());
            SectionFormatResult::empty(kind)
        }
    }
}

/// Total merge over the eight formatter results. `interests` is always empty
/// in this pipeline version.
fn merge(results: [SectionFormatResult; 8]) -> ResumeDocument {
    let mut doc = ResumeDocument::default();
    for result in results {
        match result {
            SectionFormatResult::PersonalInfo(info) => {
                doc.name = info.name;
                doc.email = info.email;
                doc.phone = info.phone;
                doc.linkedin = info.linkedin;
                doc.location = info.location;
            }
            SectionFormatResult::Summary(summary) => doc.summary = summary,
            SectionFormatResult::Skills(skills) => doc.skills = skills,
            SectionFormatResult::Experience(experience) => doc.experience = experience,
            SectionFormatResult::Projects(projects) => doc.projects = projects,
            SectionFormatResult::Education(education) => doc.education = education,
            SectionFormatResult::AchievementsAwards {
                achievements,
                awards,
            } => {
                doc.achievements = achievements;
                doc.awards = awards;
            }
            SectionFormatResult::Certifications(certifications) => {
                doc.certifications = certifications
            }
        }
    }
    doc.interests = Vec::new();
    doc
}
