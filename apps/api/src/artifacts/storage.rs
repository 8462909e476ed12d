//! Object storage for rendered artifacts. S3-compatible (MinIO locally).

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Uploads and returns the public URL. Safe to call more than once for
    /// the same key — last write wins.
    async fn upload(&self, bytes: Bytes, key: &str, content_type: &str)
        -> Result<String, AppError>;

    async fn delete(&self, url: &str) -> Result<(), AppError>;
}

pub struct S3Storage {
    client: S3Client,
    bucket: String,
    endpoint: String,
}

impl S3Storage {
    pub fn new(client: S3Client, bucket: String, endpoint: String) -> Self {
        Self {
            client,
            bucket,
            endpoint,
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint.trim_end_matches('/'), self.bucket, key)
    }

    fn key_from_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        let prefix = format!("{}/{}/", self.endpoint.trim_end_matches('/'), self.bucket);
        url.strip_prefix(prefix.as_str())
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn upload(
        &self,
        bytes: Bytes,
        key: &str,
        content_type: &str,
    ) -> Result<String, AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("upload of '{key}' failed: {e}")))?;

        let url = self.url_for(key);
        info!("Uploaded {key} to {url}");
        Ok(url)
    }

    async fn delete(&self, url: &str) -> Result<(), AppError> {
        let key = self
            .key_from_url(url)
            .ok_or_else(|| AppError::Storage(format!("'{url}' is not in this bucket")))?;

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("delete of '{key}' failed: {e}")))?;

        Ok(())
    }
}
