//! Scripted collaborators for pipeline tests. No network, no DB.

use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use uuid::Uuid;

use crate::artifacts::render::PdfRenderer;
use crate::artifacts::storage::ObjectStorage;
use crate::errors::AppError;
use crate::llm_client::{LlmError, LlmGateway};
use crate::optimize::orchestrator::ArtifactSink;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub system: String,
    /// None for free-text calls, Some(tool name) for structured calls.
    pub schema_name: Option<String>,
}

type FreeTextFn = dyn Fn(&str) -> Result<String, LlmError> + Send + Sync;
type StructuredFn = dyn Fn(&str, &str) -> Result<String, LlmError> + Send + Sync;

/// A gateway whose behavior is two closures: one for free-text calls
/// (receives the prompt), one for structured calls (receives the schema name
/// and the prompt). Every call is recorded.
pub struct StubGateway {
    free_text: Box<FreeTextFn>,
    structured: Box<StructuredFn>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubGateway {
    pub fn new<F, S>(free_text: F, structured: S) -> Self
    where
        F: Fn(&str) -> Result<String, LlmError> + Send + Sync + 'static,
        S: Fn(&str, &str) -> Result<String, LlmError> + Send + Sync + 'static,
    {
        Self {
            free_text: Box::new(free_text),
            structured: Box::new(structured),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Free-text calls echo the prompt back; structured calls return `{}`.
    pub fn echo() -> Self {
        Self::new(|prompt| Ok(prompt.to_string()), |_, _| Ok("{}".to_string()))
    }

    /// Every call fails with an API error.
    pub fn failing(message: &'static str) -> Self {
        Self::new(
            move |_| {
                Err(LlmError::Api {
                    status: 500,
                    message: message.to_string(),
                })
            },
            move |_, _| {
                Err(LlmError::Api {
                    status: 500,
                    message: message.to_string(),
                })
            },
        )
    }

    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn free_text_calls(&self) -> usize {
        self.recorded()
            .iter()
            .filter(|c| c.schema_name.is_none())
            .count()
    }

    pub fn structured_calls(&self) -> usize {
        self.recorded()
            .iter()
            .filter(|c| c.schema_name.is_some())
            .count()
    }

    /// The prompt of the first structured call recorded for a tool name.
    pub fn structured_prompt_for(&self, schema_name: &str) -> Option<String> {
        self.recorded()
            .iter()
            .find(|c| c.schema_name.as_deref() == Some(schema_name))
            .map(|c| c.prompt.clone())
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmGateway for StubGateway {
    async fn call(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            system: system.to_string(),
            schema_name: None,
        });
        (self.free_text)(prompt)
    }

    async fn call_structured(
        &self,
        prompt: &str,
        system: &str,
        schema_name: &str,
        _schema: &Value,
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            system: system.to_string(),
            schema_name: Some(schema_name.to_string()),
        });
        (self.structured)(schema_name, prompt)
    }
}

/// Renderer stub: counts calls, returns a fixed byte blob or fails.
pub struct StubRenderer {
    pub fail: bool,
    calls: Mutex<usize>,
}

impl StubRenderer {
    pub fn ok() -> Self {
        Self {
            fail: false,
            calls: Mutex::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::new(0),
        }
    }

    pub fn render_calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl PdfRenderer for StubRenderer {
    async fn render(&self, _html: &str) -> Result<Bytes, AppError> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            Err(AppError::Render("stub render failure".to_string()))
        } else {
            Ok(Bytes::from_static(b"%PDF-1.7 stub"))
        }
    }
}

/// Storage stub: records uploaded keys, mints deterministic URLs.
pub struct StubStorage {
    uploads: Mutex<Vec<String>>,
}

impl StubStorage {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn upload_calls(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn uploaded_keys(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for StubStorage {
    async fn upload(
        &self,
        _bytes: Bytes,
        key: &str,
        _content_type: &str,
    ) -> Result<String, AppError> {
        self.uploads.lock().unwrap().push(key.to_string());
        Ok(format!("https://cdn.test/{key}"))
    }

    async fn delete(&self, _url: &str) -> Result<(), AppError> {
        Ok(())
    }
}

/// Artifact sink stub: records persisted cover-letter URLs.
pub struct StubSink {
    saved: Mutex<Vec<(Uuid, String)>>,
}

impl StubSink {
    pub fn new() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
        }
    }

    pub fn saved_urls(&self) -> Vec<(Uuid, String)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactSink for StubSink {
    async fn save_cover_letter_url(&self, job_id: Uuid, url: &str) -> Result<(), AppError> {
        self.saved.lock().unwrap().push((job_id, url.to_string()));
        Ok(())
    }
}
