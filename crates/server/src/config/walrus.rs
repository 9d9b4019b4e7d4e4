use dropit_core::constants::{DEFAULT_EPOCHS, TESTNET_WALRUS_SYSTEM_OBJECT};
use serde::Deserialize;

/// Walrus endpoints, storage duration and pricing source.
///
/// # Example
///
/// ```toml
/// [walrus]
/// publisher_url = "https://publisher.walrus-testnet.walrus.space"
/// aggregator_url = "https://aggregator.walrus-testnet.walrus.space"
/// epochs = 5
///
/// [walrus.pricing]
/// mode = "fixed"
/// storage_price_per_unit_size = 100000
/// write_price_per_unit_size = 20000
/// n_shards = 1000
/// ```
#[derive(Debug, Deserialize)]
pub struct WalrusSection {
    /// Publisher base URL. Falls back to `DROPIT_WALRUS_PUBLISHER_URL`.
    pub publisher_url: Option<String>,
    /// Aggregator base URL. Falls back to `DROPIT_WALRUS_AGGREGATOR_URL`.
    pub aggregator_url: Option<String>,
    /// Storage epochs requested for uploads.
    #[serde(default = "default_epochs")]
    pub epochs: u32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Where storage prices come from.
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl Default for WalrusSection {
    fn default() -> Self {
        Self {
            publisher_url: None,
            aggregator_url: None,
            epochs: default_epochs(),
            timeout_seconds: default_timeout(),
            pricing: PricingConfig::default(),
        }
    }
}

/// Pricing source for cost estimates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PricingConfig {
    /// Read live prices from the Walrus system object.
    System {
        #[serde(default = "default_system_object")]
        system_object_id: String,
    },
    /// Use fixed prices; no ledger access.
    Fixed {
        storage_price_per_unit_size: u64,
        write_price_per_unit_size: u64,
        #[serde(default = "default_n_shards")]
        n_shards: u64,
    },
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::System {
            system_object_id: default_system_object(),
        }
    }
}

fn default_epochs() -> u32 {
    DEFAULT_EPOCHS
}

fn default_timeout() -> u64 {
    300
}

fn default_system_object() -> String {
    TESTNET_WALRUS_SYSTEM_OBJECT.to_owned()
}

fn default_n_shards() -> u64 {
    1000
}
