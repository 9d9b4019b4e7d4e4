//! Builds [`AppState`] from the loaded configuration.

use std::sync::Arc;
use std::time::Duration;

use dropit_app::{DropitConfig, Uploader, VideoLibrary};
use dropit_core::{ObjectId, SuiAddress};
use dropit_sui::{RemoteSigner, SignerConfig, SuiClient, SuiConfig, WalletSigner};
use dropit_walrus::{
    FixedPriceOracle, PriceOracle, StoragePrices, SystemPriceOracle, WalrusClient, WalrusConfig,
};
use tracing::{info, warn};

use crate::api::AppState;
use crate::config::{DropitServerConfig, PricingConfig, WalletConfig};
use crate::error::ServerError;
use crate::templates::Templates;

/// Wire the Sui and Walrus clients, pricing source, wallet and templates.
///
/// `endpoints` carries the resolved package id and Walrus URLs (see
/// [`DropitServerConfig::endpoints`]).
pub fn build_state(
    config: &DropitServerConfig,
    endpoints: &DropitConfig,
) -> Result<AppState, ServerError> {
    let sui = Arc::new(SuiClient::new(
        SuiConfig::new(&config.sui.rpc_url)
            .with_timeout(Duration::from_secs(config.sui.timeout_seconds)),
    )?);

    let walrus = Arc::new(WalrusClient::new(
        WalrusConfig::new(&endpoints.publisher_url, &endpoints.aggregator_url)
            .with_timeout(Duration::from_secs(config.walrus.timeout_seconds)),
    )?);

    let oracle: Arc<dyn PriceOracle> = match &config.walrus.pricing {
        PricingConfig::System { system_object_id } => {
            info!(system_object = %system_object_id, "pricing from Walrus system object");
            Arc::new(SystemPriceOracle::new(
                sui.clone(),
                ObjectId::new(system_object_id.clone()),
            ))
        }
        PricingConfig::Fixed {
            storage_price_per_unit_size,
            write_price_per_unit_size,
            n_shards,
        } => {
            info!(
                storage_price = storage_price_per_unit_size,
                write_price = write_price_per_unit_size,
                n_shards,
                "pricing from fixed prices"
            );
            Arc::new(FixedPriceOracle::new(StoragePrices {
                storage_price_per_unit_size: *storage_price_per_unit_size,
                write_price_per_unit_size: *write_price_per_unit_size,
                n_shards: *n_shards,
            }))
        }
    };

    let wallet = build_wallet(&config.wallet)?;
    let public_origin = config.server.public_origin();

    info!(
        package_id = %endpoints.package_id,
        publisher = %endpoints.publisher_url,
        aggregator = %endpoints.aggregator_url,
        epochs = endpoints.epochs,
        "DropIt endpoints resolved"
    );

    Ok(AppState {
        oracle,
        ledger: sui.clone(),
        wallet,
        uploader: Uploader::new(
            walrus,
            endpoints.package_id.clone(),
            public_origin.clone(),
            endpoints.epochs,
        ),
        library: VideoLibrary::new(sui, endpoints.package_id.clone()),
        public_origin,
        aggregator_url: endpoints.aggregator_url.clone(),
        epochs: endpoints.epochs,
        max_upload_bytes: config.server.max_upload_bytes(),
        templates: Arc::new(Templates::new()?),
    })
}

fn build_wallet(config: &WalletConfig) -> Result<Option<Arc<dyn WalletSigner>>, ServerError> {
    match (&config.signer_url, &config.address) {
        (Some(url), Some(address)) => {
            let mut signer = SignerConfig::new(url, SuiAddress::new(address.clone()))
                .with_timeout(Duration::from_secs(config.timeout_seconds));
            if let Some(token) = &config.token {
                signer = signer.with_token(token);
            }
            info!(signer_url = %url, address = %address, "wallet connected through remote signer");
            Ok(Some(Arc::new(RemoteSigner::new(signer)?)))
        }
        (None, None) => {
            info!("no wallet configured; uploads and deletes are disabled");
            Ok(None)
        }
        _ => {
            warn!("wallet needs both signer_url and address");
            Err(ServerError::Config(
                "[wallet] requires both signer_url and address".to_owned(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_is_optional() {
        assert!(build_wallet(&WalletConfig::default()).unwrap().is_none());
    }

    #[test]
    fn half_configured_wallet_is_rejected() {
        let config = WalletConfig {
            signer_url: Some("http://127.0.0.1:9000".into()),
            ..WalletConfig::default()
        };
        assert!(matches!(build_wallet(&config), Err(ServerError::Config(_))));
    }

    #[test]
    fn builds_state_from_defaults() {
        let config = DropitServerConfig::default();
        let endpoints = config.endpoints(&DropitConfig::default());
        let state = build_state(&config, &endpoints).unwrap();
        assert!(state.wallet.is_none());
        assert_eq!(state.public_origin, "http://localhost:8080");
        assert_eq!(state.epochs, 5);
    }
}
