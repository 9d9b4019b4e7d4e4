//! Clients and settings shared by every command.

use std::sync::Arc;

use anyhow::Context as _;
use dropit_app::{CostEstimator, Uploader, VideoLibrary};
use dropit_core::{ObjectId, PackageId, SuiAddress};
use dropit_sui::{RemoteSigner, SignerConfig, SuiClient, SuiConfig, WalletSigner};
use dropit_walrus::{SystemPriceOracle, WalrusClient, WalrusConfig};

use crate::Cli;

pub struct Context {
    pub sui: Arc<SuiClient>,
    pub walrus: Arc<WalrusClient>,
    pub wallet: Option<Arc<RemoteSigner>>,
    pub package_id: PackageId,
    pub system_object: ObjectId,
    pub origin: String,
    pub epochs: u32,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let sui = SuiClient::new(SuiConfig::new(&cli.rpc_url)).context("failed to build Sui client")?;
        let walrus = WalrusClient::new(WalrusConfig::new(&cli.publisher_url, &cli.aggregator_url))
            .context("failed to build Walrus client")?;

        let wallet = match (&cli.signer_url, &cli.address) {
            (Some(url), Some(address)) => {
                let mut config = SignerConfig::new(url, SuiAddress::new(address.clone()));
                if let Some(token) = &cli.signer_token {
                    config = config.with_token(token);
                }
                Some(Arc::new(
                    RemoteSigner::new(config).context("failed to build signer client")?,
                ))
            }
            _ => None,
        };

        tracing::debug!(
            rpc_url = %cli.rpc_url,
            publisher = %cli.publisher_url,
            aggregator = %cli.aggregator_url,
            package_id = %cli.package_id,
            wallet = wallet.is_some(),
            "clients configured"
        );

        Ok(Self {
            sui: Arc::new(sui),
            walrus: Arc::new(walrus),
            wallet,
            package_id: PackageId::new(cli.package_id.clone()),
            system_object: ObjectId::new(cli.system_object.clone()),
            origin: cli.origin.clone(),
            epochs: cli.epochs,
        })
    }

    pub fn wallet(&self) -> Option<&dyn WalletSigner> {
        self.wallet.as_deref().map(|w| w as &dyn WalletSigner)
    }

    /// `--owner` if given, else the connected wallet.
    pub fn owner(&self, owner: Option<&str>) -> Option<SuiAddress> {
        owner
            .map(SuiAddress::from)
            .or_else(|| self.wallet().map(|w| w.address().clone()))
    }

    pub fn estimator(&self) -> CostEstimator {
        let oracle = SystemPriceOracle::new(self.sui.clone(), self.system_object.clone());
        CostEstimator::new(Arc::new(oracle), self.sui.clone(), self.epochs)
    }

    pub fn uploader(&self) -> Uploader {
        Uploader::new(
            self.walrus.clone(),
            self.package_id.clone(),
            self.origin.clone(),
            self.epochs,
        )
    }

    pub fn library(&self) -> VideoLibrary {
        VideoLibrary::new(self.sui.clone(), self.package_id.clone())
    }

    pub fn aggregator_url(&self) -> &str {
        &self.walrus.config().aggregator_url
    }
}
