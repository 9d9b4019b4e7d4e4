use async_trait::async_trait;
use dropit_core::{SuiAddress, TransactionDigest};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::SignerConfig;
use crate::error::SuiError;
use crate::transaction::Transaction;

/// A connected wallet: an account that can sign and execute transactions.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// The account transactions are signed for.
    fn address(&self) -> &SuiAddress;

    /// Sign `tx` with the account key, submit it, and wait for effects.
    async fn sign_and_execute(&self, tx: &Transaction) -> Result<TransactionDigest, SuiError>;
}

/// Outcome reported by the signer service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Success,
    Failure,
}

/// Response body of the signer service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResponse {
    pub digest: TransactionDigest,
    pub status: ExecutionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
struct ExecuteRequest<'a> {
    sender: &'a SuiAddress,
    transaction: &'a Transaction,
}

/// A [`WalletSigner`] that delegates to an HTTP signing service holding the key.
pub struct RemoteSigner {
    config: SignerConfig,
    client: Client,
}

impl RemoteSigner {
    pub fn new(config: SignerConfig) -> Result<Self, SuiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: SignerConfig, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl WalletSigner for RemoteSigner {
    fn address(&self) -> &SuiAddress {
        &self.config.address
    }

    #[instrument(skip(self, tx), fields(sender = %self.config.address, calls = tx.calls.len()))]
    async fn sign_and_execute(&self, tx: &Transaction) -> Result<TransactionDigest, SuiError> {
        let body = ExecuteRequest {
            sender: &self.config.address,
            transaction: tx,
        };

        debug!(url = %self.config.url, "submitting transaction to signer");
        let mut request = self.client.post(&self.config.url).json(&body);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "signer returned error status");
            return Err(SuiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let result: ExecutionResponse = response
            .json()
            .await
            .map_err(|e| SuiError::Deserialization(e.to_string()))?;

        match result.status {
            ExecutionStatus::Success => {
                info!(digest = %result.digest, "transaction executed");
                Ok(result.digest)
            }
            ExecutionStatus::Failure => {
                let message = result
                    .error
                    .unwrap_or_else(|| format!("transaction {} failed", result.digest));
                warn!(digest = %result.digest, error = %message, "transaction failed");
                Err(SuiError::Signer(message))
            }
        }
    }
}
