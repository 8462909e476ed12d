//! Fixed per-section output schemas for the gateway's structured mode.
//!
//! Each formatter schema is a wrapper object with exactly the key(s) the
//! merge step unwraps. Keeping the schemas here, next to the kinds, means
//! the formatter and the merge can never disagree about wrapper keys.

use serde_json::{json, Value};

use crate::optimize::sections::FormatKind;

pub fn schema_for(kind: FormatKind) -> Value {
    match kind {
        FormatKind::PersonalInfo => json!({
            "type": "object",
            "properties": {
                "personal_info": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "email": {"type": "string"},
                        "phone": {"type": "string"},
                        "linkedin": {"type": "string"},
                        "location": {"type": "string"}
                    },
                    "required": ["name", "email", "phone", "linkedin", "location"]
                }
            },
            "required": ["personal_info"]
        }),
        FormatKind::Summary => json!({
            "type": "object",
            "properties": {
                "summary": {"type": "string"}
            },
            "required": ["summary"]
        }),
        FormatKind::Skills => json!({
            "type": "object",
            "properties": {
                "skills": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "category": {"type": "string"},
                            "skills": {"type": "array", "items": {"type": "string"}}
                        },
                        "required": ["category", "skills"]
                    }
                }
            },
            "required": ["skills"]
        }),
        FormatKind::Experience => json!({
            "type": "object",
            "properties": {
                "experience": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": {"type": "string"},
                            "company": {"type": "string"},
                            "location": {"type": "string"},
                            "start_date": {"type": "string"},
                            "end_date": {"type": "string"},
                            "responsibilities": {"type": "array", "items": {"type": "string"}}
                        },
                        "required": ["title", "company", "responsibilities"]
                    }
                }
            },
            "required": ["experience"]
        }),
        FormatKind::Projects => json!({
            "type": "object",
            "properties": {
                "projects": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string"},
                            "description": {"type": "string"},
                            "technologies": {"type": "array", "items": {"type": "string"}},
                            "highlights": {"type": "array", "items": {"type": "string"}},
                            "link": {"type": "string"}
                        },
                        "required": ["name", "description"]
                    }
                }
            },
            "required": ["projects"]
        }),
        FormatKind::Education => json!({
            "type": "object",
            "properties": {
                "education": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "degree": {"type": "string"},
                            "institution": {"type": "string"},
                            "location": {"type": "string"},
                            "graduation_date": {"type": "string"}
                        },
                        "required": ["degree", "institution"]
                    }
                }
            },
            "required": ["education"]
        }),
        FormatKind::AchievementsAwards => json!({
            "type": "object",
            "properties": {
                "achievements": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": {"type": "string"},
                            "description": {"type": "string"},
                            "date": {"type": "string"}
                        },
                        "required": ["title"]
                    }
                },
                "awards": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": {"type": "string"},
                            "issuer": {"type": "string"},
                            "date": {"type": "string"}
                        },
                        "required": ["title"]
                    }
                }
            },
            "required": ["achievements", "awards"]
        }),
        FormatKind::Certifications => json!({
            "type": "object",
            "properties": {
                "certifications": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string"},
                            "issuer": {"type": "string"},
                            "date": {"type": "string"}
                        },
                        "required": ["name"]
                    }
                }
            },
            "required": ["certifications"]
        }),
    }
}

/// Schema for the bulk suggestion batch. Suggestion ids are minted
/// server-side, so the model shape omits them.
pub fn suggestions_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "suggestions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "section": {
                            "type": "string",
                            "enum": ["summary", "skills", "experience", "projects",
                                     "achievements", "education", "certifications"]
                        },
                        "kind": {
                            "type": "string",
                            "enum": ["add", "remove", "enhance", "rewrite"]
                        },
                        "target": {
                            "type": "object",
                            "properties": {
                                "field": {"type": "string"},
                                "current": {"type": "string"}
                            },
                            "required": ["field", "current"]
                        },
                        "proposed": {"type": "string"},
                        "preview": {"type": "string"}
                    },
                    "required": ["section", "kind", "target", "proposed", "preview"]
                }
            }
        },
        "required": ["suggestions"]
    })
}

/// Schema for cover letter content.
pub fn cover_letter_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "opening": {"type": "string"},
            "body": {"type": "array", "items": {"type": "string"}},
            "closing": {"type": "string"}
        },
        "required": ["opening", "body", "closing"]
    })
}
