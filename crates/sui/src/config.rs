use std::time::Duration;

use dropit_core::SuiAddress;
use dropit_core::constants::DEFAULT_SUI_RPC_URL;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a Sui full node.
#[derive(Debug, Clone)]
pub struct SuiConfig {
    /// JSON-RPC endpoint of the full node.
    pub rpc_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SuiConfig {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SuiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SUI_RPC_URL)
    }
}

/// Settings for a [`RemoteSigner`](crate::RemoteSigner).
#[derive(Clone)]
pub struct SignerConfig {
    /// Endpoint that signs and executes transactions.
    pub url: String,
    /// Account the signer acts for.
    pub address: SuiAddress,
    /// Optional bearer token sent with every request.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SignerConfig {
    pub fn new(url: impl Into<String>, address: SuiAddress) -> Self {
        Self {
            url: url.into(),
            address,
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerConfig")
            .field("url", &self.url)
            .field("address", &self.address)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
