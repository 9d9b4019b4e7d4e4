mod contract;
mod server;
mod sui;
mod telemetry;
mod wallet;
mod walrus;


pub use contract::*;
pub use server::*;
pub use sui::*;
pub use telemetry::*;
pub use wallet::*;
pub use walrus::*;

use dropit_app::DropitConfig;
use dropit_core::PackageId;
use serde::Deserialize;

/// Top-level configuration for the DropIt server, loaded from a TOML file.
///
/// Every section is optional; a missing file yields the testnet defaults.
#[derive(Debug, Default, Deserialize)]
pub struct DropitServerConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Sui full node connection.
    #[serde(default)]
    pub sui: SuiSection,
    /// Walrus endpoints and pricing.
    #[serde(default)]
    pub walrus: WalrusSection,
    /// On-chain package holding the video module.
    #[serde(default)]
    pub contract: ContractConfig,
    /// Remote signer acting as the connected wallet.
    #[serde(default)]
    pub wallet: WalletConfig,
    /// OpenTelemetry distributed tracing configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl DropitServerConfig {
    /// Resolve the endpoint values: file first, then `env`, then defaults.
    pub fn endpoints(&self, env: &DropitConfig) -> DropitConfig {
        DropitConfig {
            package_id: self
                .contract
                .package_id
                .clone()
                .map_or_else(|| env.package_id.clone(), PackageId::new),
            publisher_url: self
                .walrus
                .publisher_url
                .clone()
                .unwrap_or_else(|| env.publisher_url.clone()),
            aggregator_url: self
                .walrus
                .aggregator_url
                .clone()
                .unwrap_or_else(|| env.aggregator_url.clone()),
            epochs: self.walrus.epochs,
        }
    }
}
