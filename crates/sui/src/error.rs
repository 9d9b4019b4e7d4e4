use thiserror::Error;

/// Errors raised while talking to a Sui full node or a wallet signer.
#[derive(Debug, Error)]
pub enum SuiError {
    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote endpoint returned a non-success status code.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The node answered with a JSON-RPC error object.
    #[error("{message}")]
    Rpc { code: i64, message: String },

    /// A response body did not have the expected shape.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// The signer refused or failed to execute the transaction.
    #[error("{0}")]
    Signer(String),

    /// The client is misconfigured.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<serde_json::Error> for SuiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Deserialization(err.to_string())
    }
}
