//! Prompt catalog for the optimization pipeline.
//!
//! The catalog is a plain injectable struct rather than module-level globals
//! so tests can substitute deterministic templates without touching shared
//! state. `Default` wires in the production templates below.

use crate::llm_client::prompts::{FACTUAL_INSTRUCTION, PRESERVE_CONTENT_INSTRUCTION};

/// System prompt for all Wave-1 section rewrites.
const OPTIMIZE_SYSTEM: &str = "You are an expert resume writer and ATS optimization specialist. \
    You rewrite one resume section at a time. \
    Respond with the rewritten section text only. \
    Do NOT include headers, commentary, or markdown fences.";

/// Wave-1 template, job-targeted variant.
/// Replace: {factual_instruction}, {section}, {resume_text}, {job_description}, {gap_json}
const OPTIMIZE_JOB_TEMPLATE: &str = r#"{factual_instruction}

Rewrite the {section} section of the resume below so it is maximally
competitive for the target job. Weave in the job's terminology where the
candidate's experience genuinely supports it, and address the gap analysis
findings (missing skills the candidate plausibly has, weak searchability
points, recruiter tips).

FULL ORIGINAL RESUME:
{resume_text}

TARGET JOB DESCRIPTION:
{job_description}

GAP ANALYSIS:
{gap_json}

Return only the rewritten {section} content as plain text."#;

/// Wave-1 template, no-posting variant (plain ATS/quality improvement).
/// Replace: {factual_instruction}, {section}, {resume_text}, {gap_json}
const OPTIMIZE_GENERAL_TEMPLATE: &str = r#"{factual_instruction}

Rewrite the {section} section of the resume below for clarity, impact, and
ATS-friendliness. There is no target job posting; improve the section on its
own merits and address the gap analysis findings where present.

FULL ORIGINAL RESUME:
{resume_text}

GAP ANALYSIS:
{gap_json}

Return only the rewritten {section} content as plain text."#;

/// Wave-1 template, suggestion-scoped variant.
/// Replace: {factual_instruction}, {section}, {current}, {suggestions_json}
const OPTIMIZE_SUGGESTIONS_TEMPLATE: &str = r#"{factual_instruction}

Apply the accepted suggestions below to the {section} section. Apply EXACTLY
the listed suggestions — do not make unrelated changes to the section.

CURRENT {section} CONTENT:
{current}

ACCEPTED SUGGESTIONS:
{suggestions_json}

Return only the updated {section} content as plain text."#;

/// System prompt for all Wave-2 formatting calls.
const FORMAT_SYSTEM: &str = "You are a resume data extraction engine. \
    Convert resume section text into the exact structured shape requested. \
    Extract only — never rewrite, never embellish.";

/// Wave-2 template. Replace: {preserve_instruction}, {section}, {input}
const FORMAT_TEMPLATE: &str = r#"{preserve_instruction}

Convert the following {section} content into the requested structure.

INPUT:
{input}"#;

/// System prompt for cover letter generation.
const COVER_LETTER_SYSTEM: &str = "You are an expert cover letter writer. \
    Write in a confident, specific, first-person voice grounded in the \
    candidate's actual resume. Never invent experience.";

/// Cover letter template. Replace: {document_json}, {job_description}
const COVER_LETTER_TEMPLATE: &str = r#"Write a cover letter for the candidate below applying to the target job.
Three to four short paragraphs: a hook tying the candidate to the role, one
or two paragraphs of concrete evidence from the resume, and a close.

CANDIDATE (optimized resume document):
{document_json}

TARGET JOB DESCRIPTION:
{job_description}"#;

/// System prompt for bulk suggestion generation.
const SUGGESTIONS_SYSTEM: &str = "You are an expert resume reviewer. \
    Generate concrete, independently applicable improvement suggestions. \
    Each suggestion targets exactly one section and one field within it.";

/// Suggestion generation template. Replace: {resume_text}, {gap_json}
const SUGGESTIONS_TEMPLATE: &str = r#"Generate improvement suggestions for the resume below, driven by the gap
analysis. Each suggestion must name its section (summary, skills, experience,
projects, achievements, education, certifications), its kind (add, remove,
enhance, rewrite), the field it targets with the current text at that spot,
the proposed replacement text, and a one-line preview a user can accept or
reject from.

RESUME:
{resume_text}

GAP ANALYSIS:
{gap_json}"#;

/// Injectable prompt configuration for the whole pipeline.
#[derive(Debug, Clone)]
pub struct PromptCatalog {
    pub optimize_system: String,
    pub optimize_job_template: String,
    pub optimize_general_template: String,
    pub optimize_suggestions_template: String,
    pub format_system: String,
    pub format_template: String,
    pub cover_letter_system: String,
    pub cover_letter_template: String,
    pub suggestions_system: String,
    pub suggestions_template: String,
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self {
            optimize_system: OPTIMIZE_SYSTEM.to_string(),
            optimize_job_template: OPTIMIZE_JOB_TEMPLATE.to_string(),
            optimize_general_template: OPTIMIZE_GENERAL_TEMPLATE.to_string(),
            optimize_suggestions_template: OPTIMIZE_SUGGESTIONS_TEMPLATE.to_string(),
            format_system: FORMAT_SYSTEM.to_string(),
            format_template: FORMAT_TEMPLATE.to_string(),
            cover_letter_system: COVER_LETTER_SYSTEM.to_string(),
            cover_letter_template: COVER_LETTER_TEMPLATE.to_string(),
            suggestions_system: SUGGESTIONS_SYSTEM.to_string(),
            suggestions_template: SUGGESTIONS_TEMPLATE.to_string(),
        }
    }
}

impl PromptCatalog {
    pub fn optimize_job_prompt(
        &self,
        section: &str,
        resume_text: &str,
        job_description: &str,
        gap_json: &str,
    ) -> String {
        self.optimize_job_template
            .replace("{factual_instruction}", FACTUAL_INSTRUCTION)
            .replace("{section}", section)
            .replace("{resume_text}", resume_text)
            .replace("{job_description}", job_description)
            .replace("{gap_json}", gap_json)
    }

    pub fn optimize_general_prompt(
        &self,
        section: &str,
        resume_text: &str,
        gap_json: &str,
    ) -> String {
        self.optimize_general_template
            .replace("{factual_instruction}", FACTUAL_INSTRUCTION)
            .replace("{section}", section)
            .replace("{resume_text}", resume_text)
            .replace("{gap_json}", gap_json)
    }

    pub fn optimize_suggestions_prompt(
        &self,
        section: &str,
        current: &str,
        suggestions_json: &str,
    ) -> String {
        self.optimize_suggestions_template
            .replace("{factual_instruction}", FACTUAL_INSTRUCTION)
            .replace("{section}", section)
            .replace("{current}", current)
            .replace("{suggestions_json}", suggestions_json)
    }

    pub fn format_prompt(&self, section: &str, input: &str) -> String {
        self.format_template
            .replace("{preserve_instruction}", PRESERVE_CONTENT_INSTRUCTION)
            .replace("{section}", section)
            .replace("{input}", input)
    }

    pub fn cover_letter_prompt(&self, document_json: &str, job_description: &str) -> String {
        self.cover_letter_template
            .replace("{document_json}", document_json)
            .replace("{job_description}", job_description)
    }

    pub fn suggestions_prompt(&self, resume_text: &str, gap_json: &str) -> String {
        self.suggestions_template
            .replace("{resume_text}", resume_text)
            .replace("{gap_json}", gap_json)
    }
}
