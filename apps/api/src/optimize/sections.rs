//! Section vocabulary for the two pipeline waves.

use crate::models::suggestion::SuggestionSection;

/// The five Wave-1 optimizer targets. Achievements and awards are rewritten
/// as one combined block. Education and personal info are factual fields —
/// they skip Wave 1 and are re-derived from the original resume text by the
/// formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizeSection {
    Summary,
    Skills,
    Experience,
    Projects,
    AchievementsAwards,
}

impl OptimizeSection {
    pub fn name(&self) -> &'static str {
        match self {
            OptimizeSection::Summary => "summary",
            OptimizeSection::Skills => "skills",
            OptimizeSection::Experience => "experience",
            OptimizeSection::Projects => "projects",
            OptimizeSection::AchievementsAwards => "achievements and awards",
        }
    }
}

/// The eight Wave-2 formatter kinds — one per ResumeDocument region.
/// Each produces a wrapper object holding exactly the keys listed in its
/// schema (see `schemas::schema_for`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    PersonalInfo,
    Summary,
    Skills,
    Experience,
    Projects,
    Education,
    AchievementsAwards,
    Certifications,
}

impl FormatKind {
    pub fn name(&self) -> &'static str {
        match self {
            FormatKind::PersonalInfo => "personal info",
            FormatKind::Summary => "summary",
            FormatKind::Skills => "skills",
            FormatKind::Experience => "experience",
            FormatKind::Projects => "projects",
            FormatKind::Education => "education",
            FormatKind::AchievementsAwards => "achievements and awards",
            FormatKind::Certifications => "certifications",
        }
    }

    /// Tool name passed to the gateway's structured output mode.
    pub fn schema_name(&self) -> &'static str {
        match self {
            FormatKind::PersonalInfo => "record_personal_info",
            FormatKind::Summary => "record_summary",
            FormatKind::Skills => "record_skills",
            FormatKind::Experience => "record_experience",
            FormatKind::Projects => "record_projects",
            FormatKind::Education => "record_education",
            FormatKind::AchievementsAwards => "record_achievements_awards",
            FormatKind::Certifications => "record_certifications",
        }
    }
}

/// Maps a suggestion's section to the formatter kind that consumes its
/// optimized text. Achievement suggestions feed the combined
/// achievements+awards formatter.
pub fn format_kind_for(section: SuggestionSection) -> FormatKind {
    match section {
        SuggestionSection::Summary => FormatKind::Summary,
        SuggestionSection::Skills => FormatKind::Skills,
        SuggestionSection::Experience => FormatKind::Experience,
        SuggestionSection::Projects => FormatKind::Projects,
        SuggestionSection::Achievements => FormatKind::AchievementsAwards,
        SuggestionSection::Education => FormatKind::Education,
        SuggestionSection::Certifications => FormatKind::Certifications,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_suggestion_section_maps_to_a_format_kind() {
        for section in SuggestionSection::ALL {
            // No panic and a stable mapping is all we need here.
            let _ = format_kind_for(section);
        }
        assert_eq!(
            format_kind_for(SuggestionSection::Achievements),
            FormatKind::AchievementsAwards
        );
    }
}
