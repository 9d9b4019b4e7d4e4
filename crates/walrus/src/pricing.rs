use std::sync::Arc;

use async_trait::async_trait;
use dropit_core::de::u64_from_string_or_number;
use dropit_core::{Frost, ObjectId};
use dropit_sui::{DynamicFieldName, ObjectDataOptions, ObjectReader};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::encoding::{encoded_blob_length, storage_units};
use crate::error::WalrusError;

/// Current storage prices and committee size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoragePrices {
    /// FROST per storage unit per epoch.
    pub storage_price_per_unit_size: u64,
    /// FROST per storage unit, charged once at registration.
    pub write_price_per_unit_size: u64,
    /// Number of shards in the current committee.
    pub n_shards: u64,
}

/// Price of storing one blob for a number of epochs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageCost {
    pub storage_cost: Frost,
    pub write_cost: Frost,
    pub total_cost: Frost,
}

impl StoragePrices {
    /// Cost of storing `size` unencoded bytes for `epochs` epochs.
    pub fn cost_for(&self, size: u64, epochs: u32) -> Result<StorageCost, WalrusError> {
        let too_large = || WalrusError::BlobTooLarge { size };
        let encoded = encoded_blob_length(size, self.n_shards).ok_or_else(too_large)?;
        let units = storage_units(encoded);

        let storage = units
            .checked_mul(self.storage_price_per_unit_size)
            .and_then(|v| v.checked_mul(u64::from(epochs)))
            .ok_or_else(too_large)?;
        let write = units
            .checked_mul(self.write_price_per_unit_size)
            .ok_or_else(too_large)?;
        let total = storage.checked_add(write).ok_or_else(too_large)?;

        Ok(StorageCost {
            storage_cost: Frost::new(storage),
            write_cost: Frost::new(write),
            total_cost: Frost::new(total),
        })
    }
}

/// Source of storage-cost quotes.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Quote the cost of storing `size` bytes for `epochs` epochs.
    async fn quote(&self, size: u64, epochs: u32) -> Result<StorageCost, WalrusError>;
}

/// Quotes from prices supplied up front, with no network access.
#[derive(Debug, Clone)]
pub struct FixedPriceOracle {
    prices: StoragePrices,
}

impl FixedPriceOracle {
    pub fn new(prices: StoragePrices) -> Self {
        Self { prices }
    }
}

#[async_trait]
impl PriceOracle for FixedPriceOracle {
    async fn quote(&self, size: u64, epochs: u32) -> Result<StorageCost, WalrusError> {
        self.prices.cost_for(size, epochs)
    }
}

/// Quotes from the live prices held in the Walrus system object.
///
/// The system object is versioned; its current state is a dynamic field keyed
/// by the `version` stored in the object itself, so every quote costs two
/// reads.
pub struct SystemPriceOracle {
    reader: Arc<dyn ObjectReader>,
    system_object: ObjectId,
}

impl SystemPriceOracle {
    pub fn new(reader: Arc<dyn ObjectReader>, system_object: ObjectId) -> Self {
        Self {
            reader,
            system_object,
        }
    }

    /// Read the current prices from the ledger.
    #[instrument(skip(self), fields(system_object = %self.system_object))]
    pub async fn prices(&self) -> Result<StoragePrices, WalrusError> {
        let system = self
            .reader
            .get_object(&self.system_object, ObjectDataOptions::content())
            .await?;
        let version = system
            .data
            .as_ref()
            .and_then(|d| d.fields())
            .and_then(|f| f.get("version"))
            .and_then(|v| u64_from_string_or_number(v).ok())
            .ok_or_else(|| WalrusError::Pricing("Walrus system object has no version".into()))?;

        let inner = self
            .reader
            .get_dynamic_field_object(&self.system_object, &DynamicFieldName::u64(version))
            .await?;
        let state = inner
            .data
            .as_ref()
            .and_then(|d| d.fields())
            .and_then(|f| f.pointer("/value/fields"))
            .ok_or_else(|| WalrusError::Pricing("Walrus system state not found".into()))?;

        let field = |pointer: &str| {
            state
                .pointer(pointer)
                .and_then(|v| u64_from_string_or_number(v).ok())
                .ok_or_else(|| WalrusError::Pricing(format!("Walrus system state lacks {pointer}")))
        };
        let prices = StoragePrices {
            storage_price_per_unit_size: field("/storage_price_per_unit_size")?,
            write_price_per_unit_size: field("/write_price_per_unit_size")?,
            n_shards: field("/committee/fields/n_shards")?,
        };
        debug!(version, ?prices, "read Walrus storage prices");
        Ok(prices)
    }
}

#[async_trait]
impl PriceOracle for SystemPriceOracle {
    async fn quote(&self, size: u64, epochs: u32) -> Result<StorageCost, WalrusError> {
        self.prices().await?.cost_for(size, epochs)
    }
}
