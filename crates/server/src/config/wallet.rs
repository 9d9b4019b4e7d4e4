use serde::Deserialize;

/// Remote signer used as the server's connected wallet.
///
/// Without both `signer_url` and `address`, no wallet is connected: uploads
/// and deletes are refused and listings need an explicit owner.
#[derive(Deserialize)]
pub struct WalletConfig {
    /// Endpoint that signs and executes transactions.
    pub signer_url: Option<String>,
    /// Account address the signer holds keys for.
    pub address: Option<String>,
    /// Optional bearer token for the signer.
    pub token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            signer_url: None,
            address: None,
            token: None,
            timeout_seconds: default_timeout(),
        }
    }
}

impl std::fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConfig")
            .field("signer_url", &self.signer_url)
            .field("address", &self.address)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

fn default_timeout() -> u64 {
    60
}
