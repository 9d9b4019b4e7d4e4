use dropit_app::{CostSnapshot, UploadReceipt, UploadStatus};
use dropit_core::{BlobId, Frost, ObjectId, SuiAddress, TransactionDigest, VideoEntry};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status indicator.
    #[schema(example = "ok")]
    pub status: String,
    /// Address of the connected wallet, if a signer is configured.
    pub wallet: Option<SuiAddress>,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    #[schema(example = "Connect your wallet to upload")]
    pub error: String,
}

/// Request body for `POST /v1/cost`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CostRequest {
    /// File size in bytes.
    #[schema(example = 10_485_760)]
    pub size: u64,
    /// Storage epochs; defaults to the server's configured value.
    pub epochs: Option<u32>,
    /// Account whose WAL balance is compared; defaults to the connected wallet.
    pub owner: Option<String>,
}

/// Storage cost estimate and balance comparison.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CostResponse {
    /// Epochs the quote covers.
    pub epochs: u32,
    /// Total cost in FROST, absent when no quote is available.
    pub total_cost: Option<Frost>,
    /// Total cost in WAL with four decimals.
    #[schema(example = "0.0003")]
    pub total_cost_wal: Option<String>,
    /// WAL balance in FROST, absent when unknown.
    pub wal_balance: Option<Frost>,
    /// WAL balance with four decimals.
    pub wal_balance_wal: Option<String>,
    /// `balance >= cost`, absent when either side is unknown.
    pub sufficient: Option<bool>,
    /// Message shown when the balance does not cover the cost.
    pub insufficient_message: Option<String>,
    /// Quote failure message; does not block uploads.
    pub error: Option<String>,
}

impl CostResponse {
    pub fn new(snapshot: &CostSnapshot, epochs: u32) -> Self {
        Self {
            epochs,
            total_cost: snapshot.total_cost,
            total_cost_wal: snapshot.total_cost.map(Frost::to_wal_string),
            wal_balance: snapshot.wal_balance,
            wal_balance_wal: snapshot.wal_balance.map(Frost::to_wal_string),
            sufficient: snapshot.has_sufficient_balance(),
            insufficient_message: snapshot.shortfall().map(|shortfall| {
                dropit_app::AppError::InsufficientBalance { shortfall }.to_string()
            }),
            error: snapshot.error.clone(),
        }
    }
}

/// A completed upload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadVideoResponse {
    /// Walrus blob id of the video.
    pub blob_id: BlobId,
    /// Digest of the `create_video` transaction.
    pub digest: TransactionDigest,
    /// Link to the playback page.
    #[schema(example = "https://dropit.example/watch/M4hsZGQ1oCktdzegB6HnI6Mi28S2nqOPHxK-W7_4BUk")]
    pub share_link: String,
}

impl From<UploadReceipt> for UploadVideoResponse {
    fn from(r: UploadReceipt) -> Self {
        Self {
            blob_id: r.blob_id,
            digest: r.digest,
            share_link: r.share_link,
        }
    }
}

/// Current state of the server's uploader.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadStatusResponse {
    pub uploading: bool,
    /// Progress text, absent when idle.
    #[schema(example = "Uploading video to Walrus...")]
    pub progress: Option<String>,
    /// Error of the last upload.
    pub error: Option<String>,
    /// Share link of the last successful upload.
    pub share_link: Option<String>,
}

impl From<UploadStatus> for UploadStatusResponse {
    fn from(s: UploadStatus) -> Self {
        Self {
            uploading: s.uploading,
            progress: s.progress.map(|p| p.to_string()),
            error: s.error,
            share_link: s.share_link,
        }
    }
}

/// Query parameters for `GET /v1/videos`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VideosQuery {
    /// Owner address; defaults to the connected wallet.
    pub owner: Option<String>,
}

/// A video record owned by the account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VideoSummary {
    /// Ledger object id of the record.
    pub object_id: ObjectId,
    pub title: String,
    pub blob_id: BlobId,
    pub owner: SuiAddress,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: u64,
    /// Creation date (`YYYY-MM-DD`, UTC).
    pub created_date: Option<String>,
    /// Path of the playback page.
    pub watch_path: String,
    /// Absolute link to the playback page.
    pub share_link: String,
}

impl VideoSummary {
    pub fn new(entry: &VideoEntry, origin: &str) -> Self {
        Self {
            object_id: entry.object_id.clone(),
            title: entry.record.title.clone(),
            blob_id: entry.record.blob_id.clone(),
            owner: entry.record.owner.clone(),
            created_at: entry.record.created_at,
            created_date: entry.record.created_date().map(|d| d.to_string()),
            watch_path: entry.record.watch_path(),
            share_link: entry.share_link(origin),
        }
    }
}

/// Videos owned by an account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListVideosResponse {
    pub videos: Vec<VideoSummary>,
    pub total: usize,
}

impl ListVideosResponse {
    pub fn new(entries: &[VideoEntry], origin: &str) -> Self {
        let videos: Vec<VideoSummary> = entries.iter().map(|e| VideoSummary::new(e, origin)).collect();
        Self {
            total: videos.len(),
            videos,
        }
    }
}

/// Playback location of a blob.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WatchResponse {
    pub blob_id: BlobId,
    /// Aggregator URL the video streams from.
    pub playback_url: String,
}
