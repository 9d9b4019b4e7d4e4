use dropit_core::constants::DEFAULT_SUI_RPC_URL;
use serde::Deserialize;

/// Sui full node connection.
#[derive(Debug, Deserialize)]
pub struct SuiSection {
    /// JSON-RPC endpoint.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SuiSection {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_rpc_url() -> String {
    DEFAULT_SUI_RPC_URL.to_owned()
}

fn default_timeout() -> u64 {
    30
}
