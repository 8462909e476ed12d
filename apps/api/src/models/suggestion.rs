//! Improvement suggestions — generated in bulk against a gap analysis,
//! persisted, then a user-accepted subset is fed back into the pipeline for
//! section-scoped re-optimization. Every suggestion belongs to exactly one
//! section.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// The seven sections a suggestion may target. Personal info is factual and
/// never receives suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSection {
    Summary,
    Skills,
    Experience,
    Projects,
    Achievements,
    Education,
    Certifications,
}

impl SuggestionSection {
    pub const ALL: [SuggestionSection; 7] = [
        SuggestionSection::Summary,
        SuggestionSection::Skills,
        SuggestionSection::Experience,
        SuggestionSection::Projects,
        SuggestionSection::Achievements,
        SuggestionSection::Education,
        SuggestionSection::Certifications,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SuggestionSection::Summary => "summary",
            SuggestionSection::Skills => "skills",
            SuggestionSection::Experience => "experience",
            SuggestionSection::Projects => "projects",
            SuggestionSection::Achievements => "achievements",
            SuggestionSection::Education => "education",
            SuggestionSection::Certifications => "certifications",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Add,
    Remove,
    Enhance,
    Rewrite,
}

/// What the suggestion applies to: a named field within the section plus the
/// current text at that spot, used as the rewrite baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionTarget {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub current: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: Uuid,
    pub section: SuggestionSection,
    pub kind: SuggestionKind,
    #[serde(default)]
    pub target: SuggestionTarget,
    #[serde(default)]
    pub proposed: String,
    #[serde(default)]
    pub preview: String,
}

/// DB row: the suggestion payload is stored as jsonb so the record shape can
/// evolve with the prompt schema.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SuggestionRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub payload: Value,
    pub accepted: bool,
    pub created_at: DateTime<Utc>,
}

impl SuggestionRow {
    pub fn into_suggestion(self) -> Result<Suggestion, serde_json::Error> {
        serde_json::from_value(self.payload)
    }
}
