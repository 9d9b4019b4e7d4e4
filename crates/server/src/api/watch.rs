use axum::Json;
use axum::extract::{Path, State};
use dropit_app::playback_url;
use dropit_core::BlobId;

use super::AppState;
use super::schemas::{ErrorResponse, WatchResponse};
use crate::error::ServerError;

/// `GET /v1/watch/{blob_id}` -- aggregator URL a video streams from.
#[utoipa::path(
    get,
    path = "/v1/watch/{blob_id}",
    tag = "Watch",
    summary = "Playback URL",
    params(
        ("blob_id" = String, Path, description = "Walrus blob id"),
    ),
    responses(
        (status = 200, description = "Playback location", body = WatchResponse),
        (status = 400, description = "Invalid video link", body = ErrorResponse),
    )
)]
pub async fn watch_url(
    State(state): State<AppState>,
    Path(blob_id): Path<String>,
) -> Result<Json<WatchResponse>, ServerError> {
    let url = playback_url(&state.aggregator_url, Some(&blob_id))?;
    Ok(Json(WatchResponse {
        blob_id: BlobId::new(blob_id),
        playback_url: url,
    }))
}
