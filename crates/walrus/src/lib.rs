pub mod client;
pub mod config;
pub mod encoding;
pub mod error;
pub mod pricing;
pub mod types;

#[cfg(test)]
pub(crate) mod mock_server;

pub use client::{BlobPublisher, WalrusClient};
pub use config::WalrusConfig;
pub use error::WalrusError;
pub use pricing::{FixedPriceOracle, PriceOracle, StorageCost, StoragePrices, SystemPriceOracle};
pub use types::{StoreOutcome, StoredBlob, UploadResponse};
