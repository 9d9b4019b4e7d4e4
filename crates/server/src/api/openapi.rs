#![allow(clippy::needless_for_each)]

use dropit_core::{BlobId, Frost, ObjectId, SuiAddress, TransactionDigest};

use super::schemas::{
    CostRequest, CostResponse, ErrorResponse, HealthResponse, ListVideosResponse,
    UploadStatusResponse, UploadVideoResponse, VideoSummary, WatchResponse,
};

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "DropIt API",
        version = "0.1.0",
        description = "Upload videos to Walrus, record them on Sui, and manage your uploads.",
        license(name = "Apache-2.0")
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Cost", description = "Storage cost estimation"),
        (name = "Upload", description = "Video upload and progress"),
        (name = "Videos", description = "Owned video records"),
        (name = "Watch", description = "Playback locations")
    ),
    paths(
        super::health::health,
        super::cost::estimate_cost,
        super::upload::upload_video,
        super::upload::upload_status,
        super::videos::list_videos,
        super::videos::delete_video,
        super::watch::watch_url,
    ),
    components(schemas(
        HealthResponse,
        ErrorResponse,
        CostRequest,
        CostResponse,
        UploadVideoResponse,
        UploadStatusResponse,
        VideoSummary,
        ListVideosResponse,
        WatchResponse,
        Frost,
        BlobId,
        ObjectId,
        SuiAddress,
        TransactionDigest,
    ))
)]
pub struct ApiDoc;
