//! Document → HTML templating. Pure functions; the render sidecar turns the
//! HTML into PDFs.

use crate::artifacts::cover_letter::CoverLetter;
use crate::models::document::ResumeDocument;

/// Minimal HTML escaping for text interpolated into the templates.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

const PAGE_STYLE: &str = r#"
  body { font-family: 'Inter', 'Helvetica Neue', sans-serif; font-size: 11pt;
         color: #1a1a1a; margin: 1in; line-height: 1.35; }
  h1 { font-size: 18pt; margin: 0; }
  h2 { font-size: 12pt; border-bottom: 1px solid #999; margin: 14pt 0 4pt;
       text-transform: uppercase; letter-spacing: 0.06em; }
  .contact { color: #444; margin-bottom: 8pt; }
  .entry-head { display: flex; justify-content: space-between; font-weight: 600; }
  ul { margin: 2pt 0 6pt 14pt; padding: 0; }
  li { margin-bottom: 2pt; }
  p { margin: 0 0 8pt; }
"#;

pub fn resume_html(doc: &ResumeDocument) -> String {
    let mut body = String::new();

    body.push_str(&format!("<h1>{}</h1>\n", escape(&doc.name)));
    let contact: Vec<String> = [&doc.email, &doc.phone, &doc.linkedin, &doc.location]
        .iter()
        .filter(|v| !v.is_empty())
        .map(|v| escape(v))
        .collect();
    body.push_str(&format!(
        "<div class=\"contact\">{}</div>\n",
        contact.join(" · ")
    ));

    if !doc.summary.is_empty() {
        body.push_str("<h2>Summary</h2>\n");
        body.push_str(&format!("<p>{}</p>\n", escape(&doc.summary)));
    }

    if !doc.skills.is_empty() {
        body.push_str("<h2>Skills</h2>\n<ul>\n");
        for group in &doc.skills {
            body.push_str(&format!(
                "<li><strong>{}:</strong> {}</li>\n",
                escape(&group.category),
                escape(&group.skills.join(", "))
            ));
        }
        body.push_str("</ul>\n");
    }

    if !doc.experience.is_empty() {
        body.push_str("<h2>Experience</h2>\n");
        for entry in &doc.experience {
            body.push_str(&format!(
                "<div class=\"entry-head\"><span>{} — {}</span><span>{} – {}</span></div>\n",
                escape(&entry.title),
                escape(&entry.company),
                escape(&entry.start_date),
                escape(&entry.end_date)
            ));
            body.push_str("<ul>\n");
            for bullet in &entry.responsibilities {
                body.push_str(&format!("<li>{}</li>\n", escape(bullet)));
            }
            body.push_str("</ul>\n");
        }
    }

    if !doc.projects.is_empty() {
        body.push_str("<h2>Projects</h2>\n");
        for project in &doc.projects {
            body.push_str(&format!(
                "<div class=\"entry-head\"><span>{}</span><span>{}</span></div>\n",
                escape(&project.name),
                escape(&project.technologies.join(", "))
            ));
            body.push_str(&format!("<p>{}</p>\n", escape(&project.description)));
            if !project.highlights.is_empty() {
                body.push_str("<ul>\n");
                for highlight in &project.highlights {
                    body.push_str(&format!("<li>{}</li>\n", escape(highlight)));
                }
                body.push_str("</ul>\n");
            }
        }
    }

    if !doc.education.is_empty() {
        body.push_str("<h2>Education</h2>\n");
        for entry in &doc.education {
            body.push_str(&format!(
                "<div class=\"entry-head\"><span>{}, {}</span><span>{}</span></div>\n",
                escape(&entry.degree),
                escape(&entry.institution),
                escape(&entry.graduation_date)
            ));
        }
    }

    if !doc.certifications.is_empty() {
        body.push_str("<h2>Certifications</h2>\n<ul>\n");
        for cert in &doc.certifications {
            body.push_str(&format!(
                "<li>{} — {} ({})</li>\n",
                escape(&cert.name),
                escape(&cert.issuer),
                escape(&cert.date)
            ));
        }
        body.push_str("</ul>\n");
    }

    if !doc.achievements.is_empty() || !doc.awards.is_empty() {
        body.push_str("<h2>Achievements &amp; Awards</h2>\n<ul>\n");
        for achievement in &doc.achievements {
            body.push_str(&format!(
                "<li>{} — {}</li>\n",
                escape(&achievement.title),
                escape(&achievement.description)
            ));
        }
        for award in &doc.awards {
            body.push_str(&format!(
                "<li>{} ({})</li>\n",
                escape(&award.title),
                escape(&award.issuer)
            ));
        }
        body.push_str("</ul>\n");
    }

    wrap_page(&doc.name, &body)
}

pub fn cover_letter_html(letter: &CoverLetter, doc: &ResumeDocument) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>\n", escape(&doc.name)));
    let contact: Vec<String> = [&doc.email, &doc.phone]
        .iter()
        .filter(|v| !v.is_empty())
        .map(|v| escape(v))
        .collect();
    body.push_str(&format!(
        "<div class=\"contact\">{}</div>\n",
        contact.join(" · ")
    ));

    body.push_str(&format!("<p>{}</p>\n", escape(&letter.opening)));
    for paragraph in &letter.body {
        body.push_str(&format!("<p>{}</p>\n", escape(paragraph)));
    }
    body.push_str(&format!("<p>{}</p>\n", escape(&letter.closing)));
    body.push_str(&format!("<p>{}</p>\n", escape(&doc.name)));

    wrap_page(&doc.name, &body)
}

fn wrap_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        PAGE_STYLE,
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{ExperienceEntry, SkillGroup};

    #[test]
    fn test_resume_html_escapes_user_content() {
        let doc = ResumeDocument {
            name: "Jane <script>alert(1)</script>".to_string(),
            ..Default::default()
        };
        let html = resume_html(&doc);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let doc = ResumeDocument {
            name: "Jane Doe".to_string(),
            ..Default::default()
        };
        let html = resume_html(&doc);
        assert!(!html.contains("<h2>Experience</h2>"));
        assert!(!html.contains("<h2>Skills</h2>"));
    }

    #[test]
    fn test_populated_sections_render_their_content() {
        let doc = ResumeDocument {
            name: "Jane Doe".to_string(),
            skills: vec![SkillGroup {
                category: "Languages".to_string(),
                skills: vec!["Python".to_string(), "Rust".to_string()],
            }],
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                responsibilities: vec!["Built the thing".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let html = resume_html(&doc);
        assert!(html.contains("Python, Rust"));
        assert!(html.contains("Engineer — Acme"));
        assert!(html.contains("Built the thing"));
    }

    #[test]
    fn test_cover_letter_html_contains_all_paragraphs() {
        let letter = CoverLetter {
            opening: "Dear team".to_string(),
            body: vec!["First point.".to_string(), "Second point.".to_string()],
            closing: "Sincerely".to_string(),
        };
        let doc = ResumeDocument {
            name: "Jane Doe".to_string(),
            ..Default::default()
        };
        let html = cover_letter_html(&letter, &doc);
        assert!(html.contains("Dear team"));
        assert!(html.contains("First point."));
        assert!(html.contains("Second point."));
        assert!(html.contains("Sincerely"));
    }
}
