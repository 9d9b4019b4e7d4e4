pub mod cost;
pub mod health;
pub mod openapi;
pub mod pages;
pub mod schemas;
pub mod upload;
pub mod videos;
pub mod watch;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use dropit_app::{CostEstimator, CostSnapshot, FileUpload, UploadReceipt, Uploader, VideoLibrary};
use dropit_core::SuiAddress;
use dropit_sui::{LedgerReader, WalletSigner};
use dropit_walrus::PriceOracle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ServerError;
use crate::templates::Templates;

use self::openapi::ApiDoc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Storage price source for cost estimates.
    pub oracle: Arc<dyn PriceOracle>,
    /// Balance and owned-object reads.
    pub ledger: Arc<dyn LedgerReader>,
    /// The connected wallet (None when no signer is configured).
    pub wallet: Option<Arc<dyn WalletSigner>>,
    /// Upload orchestrator; one upload at a time per server.
    pub uploader: Uploader,
    /// Listing and deletion of video records.
    pub library: VideoLibrary,
    /// Origin share links are built from.
    pub public_origin: String,
    /// Aggregator base URL used for playback.
    pub aggregator_url: String,
    /// Storage epochs quoted when a request does not name any.
    pub epochs: u32,
    /// Largest accepted upload body in bytes.
    pub max_upload_bytes: usize,
    /// HTML page templates.
    pub templates: Arc<Templates>,
}

impl AppState {
    /// Address of the connected wallet, if any.
    pub fn wallet_address(&self) -> Option<&SuiAddress> {
        self.wallet.as_deref().map(|w| w.address())
    }

    /// Explicit owner if non-empty, else the connected wallet.
    pub fn owner_or_wallet(&self, owner: Option<String>) -> Option<SuiAddress> {
        owner
            .filter(|o| !o.trim().is_empty())
            .map(SuiAddress::new)
            .or_else(|| self.wallet_address().cloned())
    }

    /// A fresh estimator quoting `epochs` (the configured default when `None`).
    pub fn estimator(&self, epochs: Option<u32>) -> CostEstimator {
        CostEstimator::new(
            Arc::clone(&self.oracle),
            Arc::clone(&self.ledger),
            epochs.unwrap_or(self.epochs),
        )
    }

    /// Quote the file against the wallet balance, then run the upload.
    pub async fn upload(&self, file: FileUpload) -> Result<UploadReceipt, ServerError> {
        let wallet = self.wallet.as_deref();
        let cost = match wallet {
            Some(w) => {
                let size = u64::try_from(file.data.len()).unwrap_or(u64::MAX);
                self.estimator(None)
                    .estimate(size, Some(w.address().clone()))
                    .await
            }
            None => CostSnapshot::default(),
        };
        Ok(self.uploader.upload(wallet, file, &cost).await?)
    }
}

/// Build the Axum router with the HTML pages, JSON API and Swagger UI.
pub fn router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    let api = Router::new()
        .route("/health", get(health::health))
        .route("/v1/cost", post(cost::estimate_cost))
        .route(
            "/v1/upload",
            post(upload::upload_video).layer(upload_limit.clone()),
        )
        .route("/v1/upload/status", get(upload::upload_status))
        .route("/v1/videos", get(videos::list_videos))
        .route("/v1/videos/{object_id}", delete(videos::delete_video))
        .route("/v1/watch/{blob_id}", get(watch::watch_url));

    let html = Router::new()
        .route(
            "/",
            get(pages::upload_page)
                .post(pages::upload_submit)
                .layer(upload_limit),
        )
        .route("/watch", get(pages::invalid_link_page))
        .route("/watch/", get(pages::invalid_link_page))
        .route("/watch/{blob_id}", get(pages::watch_page))
        .route("/my", get(pages::my_videos_page))
        .route("/my/{object_id}/delete", post(pages::delete_submit));

    Router::new()
        .merge(api)
        .merge(html)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
