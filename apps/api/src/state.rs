use std::sync::Arc;

use sqlx::PgPool;

use crate::artifacts::render::PdfRenderer;
use crate::artifacts::storage::ObjectStorage;
use crate::config::Config;
use crate::llm_client::LlmGateway;
use crate::optimize::prompts::PromptCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
/// The pipeline collaborators live behind traits so handlers and tests see
/// the same seams.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: Arc<dyn LlmGateway>,
    pub renderer: Arc<dyn PdfRenderer>,
    pub storage: Arc<dyn ObjectStorage>,
    pub prompts: Arc<PromptCatalog>,
    pub config: Config,
}
