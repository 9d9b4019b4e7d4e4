use dropit_sui::SuiError;
use thiserror::Error;

/// Errors raised by the Walrus client and the pricing oracles.
#[derive(Debug, Error)]
pub enum WalrusError {
    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The publisher or aggregator answered with a non-success status.
    #[error("Walrus {operation} failed: {reason}")]
    Status {
        operation: &'static str,
        status: u16,
        reason: String,
    },

    /// The publisher accepted the upload but named no blob.
    #[error("No blob ID returned from Walrus")]
    MissingBlobId,

    /// A response body did not have the expected shape.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Storage prices could not be determined.
    #[error("{0}")]
    Pricing(String),

    /// The blob exceeds what the encoding can represent.
    #[error("blob of {size} bytes is too large to encode")]
    BlobTooLarge { size: u64 },

    /// The client is misconfigured.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<SuiError> for WalrusError {
    fn from(err: SuiError) -> Self {
        Self::Pricing(err.to_string())
    }
}

impl From<serde_json::Error> for WalrusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Deserialization(err.to_string())
    }
}
