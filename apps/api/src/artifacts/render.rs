//! PDF rendering via the headless-chromium sidecar: HTML in, PDF bytes out.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;

use crate::errors::AppError;

#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Bytes, AppError>;
}

pub struct HttpPdfRenderer {
    client: Client,
    endpoint: String,
}

impl HttpPdfRenderer {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
        }
    }
}

#[async_trait]
impl PdfRenderer for HttpPdfRenderer {
    async fn render(&self, html: &str) -> Result<Bytes, AppError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "text/html")
            .body(html.to_string())
            .send()
            .await
            .map_err(|e| AppError::Render(format!("render request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Render(format!(
                "render sidecar returned {status}: {body}"
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| AppError::Render(format!("render response body failed: {e}")))
    }
}
