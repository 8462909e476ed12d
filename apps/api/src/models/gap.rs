//! Gap Analysis — the structured diff between a resume and a job description.
//!
//! Produced upstream of this service and consumed read-only by the optimizer
//! prompts, so every field is defaultable: a sparse or partial analysis must
//! never fail deserialization.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    #[serde(default)]
    pub skills: GapSkills,
    /// Weak searchability points (missing section headers, unparseable
    /// formatting, absent keywords in headings).
    #[serde(default)]
    pub searchability: Vec<String>,
    #[serde(default)]
    pub recruiter_tips: Vec<String>,
    #[serde(default)]
    pub match_rate: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapSkills {
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub matched_skills: Vec<String>,
}
