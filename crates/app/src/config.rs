use dropit_core::PackageId;
use dropit_core::constants::{
    DEFAULT_AGGREGATOR_URL, DEFAULT_EPOCHS, DEFAULT_PACKAGE_ID, DEFAULT_PUBLISHER_URL,
};

pub const PACKAGE_ID_ENV: &str = "DROPIT_PACKAGE_ID";
pub const PUBLISHER_URL_ENV: &str = "DROPIT_WALRUS_PUBLISHER_URL";
pub const AGGREGATOR_URL_ENV: &str = "DROPIT_WALRUS_AGGREGATOR_URL";

/// The three externally supplied endpoint values, plus upload defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropitConfig {
    pub package_id: PackageId,
    pub publisher_url: String,
    pub aggregator_url: String,
    pub epochs: u32,
}

impl DropitConfig {
    /// Read the endpoint values from the process environment, falling back to
    /// the testnet defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };
        Self {
            package_id: PackageId::new(get(PACKAGE_ID_ENV, DEFAULT_PACKAGE_ID)),
            publisher_url: get(PUBLISHER_URL_ENV, DEFAULT_PUBLISHER_URL),
            aggregator_url: get(AGGREGATOR_URL_ENV, DEFAULT_AGGREGATOR_URL),
            epochs: DEFAULT_EPOCHS,
        }
    }
}

impl Default for DropitConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
