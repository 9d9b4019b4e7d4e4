//! Upload orchestration: blob first, then the on-chain record.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use dropit_core::constants::{CREATE_VIDEO_FUNCTION, DEFAULT_EPOCHS, VIDEO_MODULE};
use dropit_core::{BlobId, PackageId, TransactionDigest, share_link};
use dropit_sui::{CallArg, MoveCall, Transaction, WalletSigner};
use dropit_walrus::BlobPublisher;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

use crate::cost::CostSnapshot;
use crate::error::AppError;

const UPLOAD_FALLBACK_ERROR: &str = "Upload failed";
const UPLOAD_CANCELLED_ERROR: &str = "Upload cancelled";

/// Step of an upload currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStage {
    StoringBlob,
    RecordingMetadata,
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StoringBlob => f.write_str("Uploading video to Walrus..."),
            Self::RecordingMetadata => f.write_str("Storing metadata on Sui..."),
        }
    }
}

/// Observable state of an [`Uploader`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadStatus {
    pub uploading: bool,
    pub progress: Option<UploadStage>,
    pub error: Option<String>,
    pub share_link: Option<String>,
}

impl UploadStatus {
    /// Progress text for display, empty when idle.
    pub fn progress_text(&self) -> String {
        self.progress.map(|p| p.to_string()).unwrap_or_default()
    }
}

/// A file selected for upload.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub data: Bytes,
    /// Optional title; an empty title falls back to the file name.
    pub title: Option<String>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
            title: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The title recorded on chain.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.file_name)
    }
}

/// Result of a completed upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    pub blob_id: BlobId,
    pub digest: TransactionDigest,
    pub share_link: String,
}

struct Inner {
    publisher: Arc<dyn BlobPublisher>,
    package_id: PackageId,
    public_origin: String,
    epochs: u32,
    status: watch::Sender<UploadStatus>,
}

/// Sequences a blob upload and the `create_video` transaction.
///
/// At most one upload runs at a time per uploader. Cheap to clone; clones
/// share state.
#[derive(Clone)]
pub struct Uploader {
    inner: Arc<Inner>,
}

impl Uploader {
    pub fn new(
        publisher: Arc<dyn BlobPublisher>,
        package_id: PackageId,
        public_origin: impl Into<String>,
        epochs: u32,
    ) -> Self {
        let (status, _) = watch::channel(UploadStatus::default());
        Self {
            inner: Arc::new(Inner {
                publisher,
                package_id,
                public_origin: public_origin.into(),
                epochs: if epochs == 0 { DEFAULT_EPOCHS } else { epochs },
                status,
            }),
        }
    }

    pub fn status(&self) -> UploadStatus {
        self.inner.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UploadStatus> {
        self.inner.status.subscribe()
    }

    /// Clear the previous result, as when a new file is selected.
    pub fn reset(&self) {
        self.inner.status.send_if_modified(|s| {
            if s.uploading {
                return false;
            }
            *s = UploadStatus::default();
            true
        });
    }

    /// Upload `file` and record it on chain through `wallet`.
    ///
    /// Refused without touching the status while another upload runs, when no
    /// wallet is connected, or when `cost` shows an insufficient balance.
    #[instrument(
        skip(self, wallet, file, cost),
        fields(file = %file.file_name, size = file.data.len())
    )]
    pub async fn upload(
        &self,
        wallet: Option<&dyn WalletSigner>,
        file: FileUpload,
        cost: &CostSnapshot,
    ) -> Result<UploadReceipt, AppError> {
        let wallet = wallet.ok_or(AppError::NotConnected)?;
        if let Some(shortfall) = cost.shortfall() {
            return Err(AppError::InsufficientBalance { shortfall });
        }

        let started = self.inner.status.send_if_modified(|s| {
            if s.uploading {
                return false;
            }
            *s = UploadStatus {
                uploading: true,
                progress: Some(UploadStage::StoringBlob),
                error: None,
                share_link: None,
            };
            true
        });
        if !started {
            return Err(AppError::UploadInFlight);
        }
        let guard = InFlight::new(&self.inner.status);

        let outcome = self.run(wallet, &file).await;
        guard.disarm();
        match outcome {
            Ok(receipt) => {
                self.inner.status.send_modify(|s| {
                    s.uploading = false;
                    s.progress = None;
                    s.share_link = Some(receipt.share_link.clone());
                });
                info!(blob_id = %receipt.blob_id, digest = %receipt.digest, "upload complete");
                Ok(receipt)
            }
            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, "upload failed");
                self.inner.status.send_modify(|s| {
                    s.uploading = false;
                    s.progress = None;
                    s.error = Some(if message.is_empty() {
                        UPLOAD_FALLBACK_ERROR.to_owned()
                    } else {
                        message
                    });
                });
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        wallet: &dyn WalletSigner,
        file: &FileUpload,
    ) -> Result<UploadReceipt, AppError> {
        let stored = self
            .inner
            .publisher
            .store_blob(file.data.clone(), self.inner.epochs)
            .await?;

        self.inner
            .status
            .send_modify(|s| s.progress = Some(UploadStage::RecordingMetadata));

        let tx = create_video_tx(&self.inner.package_id, file.display_title(), &stored.blob_id)
            .with_sender(wallet.address().clone());
        let digest = wallet.sign_and_execute(&tx).await?;

        Ok(UploadReceipt {
            share_link: share_link(&self.inner.public_origin, &stored.blob_id),
            blob_id: stored.blob_id,
            digest,
        })
    }
}

/// Resets the in-flight status when an upload future is dropped before it
/// settles.
struct InFlight<'a> {
    status: &'a watch::Sender<UploadStatus>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(status: &'a watch::Sender<UploadStatus>) -> Self {
        Self {
            status,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("upload cancelled before completion");
            self.status.send_modify(|s| {
                s.uploading = false;
                s.progress = None;
                s.error = Some(UPLOAD_CANCELLED_ERROR.to_owned());
            });
        }
    }
}

/// `<package>::video::create_video(title, blob_id, clock)`
pub fn create_video_tx(package_id: &PackageId, title: &str, blob_id: &BlobId) -> Transaction {
    Transaction::single(
        MoveCall::new(package_id.clone(), VIDEO_MODULE, CREATE_VIDEO_FUNCTION)
            .with_arg(CallArg::pure_string(title))
            .with_arg(CallArg::pure_string(blob_id.as_str()))
            .with_arg(CallArg::clock()),
    )
}
