use async_trait::async_trait;
use bytes::Bytes;
use dropit_core::BlobId;
use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

use crate::config::WalrusConfig;
use crate::error::WalrusError;
use crate::types::{StoredBlob, UploadResponse};

/// Stores blobs on Walrus.
#[async_trait]
pub trait BlobPublisher: Send + Sync {
    /// Upload `data` for `epochs` storage epochs.
    async fn store_blob(&self, data: Bytes, epochs: u32) -> Result<StoredBlob, WalrusError>;
}

/// HTTP client for a Walrus publisher and aggregator.
pub struct WalrusClient {
    config: WalrusConfig,
    client: Client,
}

impl WalrusClient {
    pub fn new(config: WalrusConfig) -> Result<Self, WalrusError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: WalrusConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &WalrusConfig {
        &self.config
    }

    /// Download a blob's bytes from the aggregator.
    #[instrument(skip(self), fields(blob_id = %blob_id))]
    pub async fn read_blob(&self, blob_id: &BlobId) -> Result<Bytes, WalrusError> {
        let url = self.config.blob_url(blob_id);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, "read").await?;
        let data = response.bytes().await?;
        debug!(size = data.len(), "blob read");
        Ok(data)
    }
}

#[async_trait]
impl BlobPublisher for WalrusClient {
    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn store_blob(&self, data: Bytes, epochs: u32) -> Result<StoredBlob, WalrusError> {
        let url = self.config.store_url();
        debug!(url = %url, "uploading blob");

        let response = self
            .client
            .put(&url)
            .query(&[("epochs", epochs)])
            .body(data)
            .send()
            .await?;
        let response = check_status(response, "upload").await?;

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| WalrusError::Deserialization(e.to_string()))?;
        let stored = body.into_stored_blob().ok_or(WalrusError::MissingBlobId)?;

        info!(blob_id = %stored.blob_id, outcome = ?stored.outcome, "blob stored");
        Ok(stored)
    }
}

async fn check_status(response: Response, operation: &'static str) -> Result<Response, WalrusError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), body = %body, operation, "Walrus request failed");
    Err(WalrusError::Status {
        operation,
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("unknown status").to_owned(),
    })
}
