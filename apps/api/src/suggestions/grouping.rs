//! Groups an accepted-suggestion subset by section.
//!
//! The grouping is a fixed map over the seven known section names — every
//! suggestion lands in exactly one bucket, and an empty bucket later means
//! "no optimizer call for that section, reformat the original text".

use crate::models::suggestion::{Suggestion, SuggestionSection};

#[derive(Debug, Clone, Default)]
pub struct SectionSuggestions {
    pub summary: Vec<Suggestion>,
    pub skills: Vec<Suggestion>,
    pub experience: Vec<Suggestion>,
    pub projects: Vec<Suggestion>,
    pub achievements: Vec<Suggestion>,
    pub education: Vec<Suggestion>,
    pub certifications: Vec<Suggestion>,
}

impl SectionSuggestions {
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.summary.len()
            + self.skills.len()
            + self.experience.len()
            + self.projects.len()
            + self.achievements.len()
            + self.education.len()
            + self.certifications.len()
    }

    pub fn bucket(&self, section: SuggestionSection) -> &[Suggestion] {
        match section {
            SuggestionSection::Summary => &self.summary,
            SuggestionSection::Skills => &self.skills,
            SuggestionSection::Experience => &self.experience,
            SuggestionSection::Projects => &self.projects,
            SuggestionSection::Achievements => &self.achievements,
            SuggestionSection::Education => &self.education,
            SuggestionSection::Certifications => &self.certifications,
        }
    }
}

pub fn group_by_section(accepted: Vec<Suggestion>) -> SectionSuggestions {
    let mut grouped = SectionSuggestions::default();
    for suggestion in accepted {
        match suggestion.section {
            SuggestionSection::Summary => grouped.summary.push(suggestion),
            SuggestionSection::Skills => grouped.skills.push(suggestion),
            SuggestionSection::Experience => grouped.experience.push(suggestion),
            SuggestionSection::Projects => grouped.projects.push(suggestion),
            SuggestionSection::Achievements => grouped.achievements.push(suggestion),
            SuggestionSection::Education => grouped.education.push(suggestion),
            SuggestionSection::Certifications => grouped.certifications.push(suggestion),
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::suggestion::{SuggestionKind, SuggestionTarget};
    use uuid::Uuid;

    fn suggestion(section: SuggestionSection, field: &str) -> Suggestion {
        Suggestion {
            id: Uuid::new_v4(),
            section,
            kind: SuggestionKind::Enhance,
            target: SuggestionTarget {
                field: field.to_string(),
                current: String::new(),
            },
            proposed: String::new(),
            preview: String::new(),
        }
    }

    #[test]
    fn test_every_suggestion_lands_in_exactly_one_bucket() {
        let accepted = vec![
            suggestion(SuggestionSection::Summary, "summary"),
            suggestion(SuggestionSection::Skills, "skills"),
            suggestion(SuggestionSection::Skills, "skills"),
            suggestion(SuggestionSection::Education, "degree"),
        ];
        let grouped = group_by_section(accepted);

        assert_eq!(grouped.summary.len(), 1);
        assert_eq!(grouped.skills.len(), 2);
        assert_eq!(grouped.education.len(), 1);
        assert_eq!(grouped.experience.len(), 0);
        assert_eq!(grouped.total(), 4);
    }

    #[test]
    fn test_order_within_a_bucket_is_preserved() {
        let first = suggestion(SuggestionSection::Experience, "first");
        let second = suggestion(SuggestionSection::Experience, "second");
        let grouped = group_by_section(vec![first.clone(), second.clone()]);

        assert_eq!(grouped.experience[0].target.field, "first");
        assert_eq!(grouped.experience[1].target.field, "second");
    }

    #[test]
    fn test_empty_input_yields_empty_grouping() {
        let grouped = group_by_section(vec![]);
        assert!(grouped.is_empty());
        for section in SuggestionSection::ALL {
            assert!(grouped.bucket(section).is_empty());
        }
    }
}
