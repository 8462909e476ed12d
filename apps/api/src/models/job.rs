#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A tracked job posting plus the artifacts produced against it.
/// `optimized_resume_url` and `cover_letter_url` double as the idempotency
/// markers: when both are present a repeat optimization request is served
/// from cache.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub title: Option<String>,
    pub description: String,
    pub gap_analysis: Option<Value>,
    pub optimized_document: Option<Value>,
    pub optimized_resume_url: Option<String>,
    pub cover_letter_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An uploaded resume. `raw_text` is the extracted plain text every
/// optimization variant starts from.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub raw_text: String,
    pub optimized_document: Option<Value>,
    pub optimized_resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
