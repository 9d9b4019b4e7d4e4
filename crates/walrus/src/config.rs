use std::time::Duration;

use dropit_core::BlobId;
use dropit_core::constants::{DEFAULT_AGGREGATOR_URL, DEFAULT_PUBLISHER_URL};

/// Endpoints and defaults for talking to Walrus.
#[derive(Debug, Clone)]
pub struct WalrusConfig {
    /// Base URL of the publisher (uploads).
    pub publisher_url: String,
    /// Base URL of the aggregator (reads and playback).
    pub aggregator_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl WalrusConfig {
    pub fn new(publisher_url: impl Into<String>, aggregator_url: impl Into<String>) -> Self {
        Self {
            publisher_url: publisher_url.into(),
            aggregator_url: aggregator_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{publisher}/v1/blobs`
    pub fn store_url(&self) -> String {
        format!("{}/v1/blobs", self.publisher_url.trim_end_matches('/'))
    }

    /// `{aggregator}/v1/blobs/<blob_id>`
    pub fn blob_url(&self, blob_id: &BlobId) -> String {
        format!(
            "{}/v1/blobs/{blob_id}",
            self.aggregator_url.trim_end_matches('/')
        )
    }
}

impl Default for WalrusConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLISHER_URL, DEFAULT_AGGREGATOR_URL)
    }
}
