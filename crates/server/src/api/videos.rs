use axum::Json;
use axum::extract::{Path, Query, State};
use dropit_app::AppError;
use dropit_core::ObjectId;
use tracing::instrument;

use super::AppState;
use super::schemas::{ErrorResponse, ListVideosResponse, VideosQuery};
use crate::error::ServerError;

/// `GET /v1/videos` -- video records owned by an account.
#[utoipa::path(
    get,
    path = "/v1/videos",
    tag = "Videos",
    summary = "List videos",
    description = "Lists `Video` objects owned by `owner`, or by the connected wallet when omitted. Only the first page of owned objects is read.",
    params(VideosQuery),
    responses(
        (status = 200, description = "Owned videos", body = ListVideosResponse),
        (status = 400, description = "No owner and no wallet connected", body = ErrorResponse),
        (status = 502, description = "Sui request failed", body = ErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn list_videos(
    State(state): State<AppState>,
    Query(query): Query<VideosQuery>,
) -> Result<Json<ListVideosResponse>, ServerError> {
    let owner = state
        .owner_or_wallet(query.owner)
        .ok_or_else(|| ServerError::BadRequest("owner is required when no wallet is connected".to_owned()))?;
    let entries = state.library.list(&owner).await?;
    Ok(Json(ListVideosResponse::new(&entries, &state.public_origin)))
}

/// `DELETE /v1/videos/{object_id}` -- delete a record and return the refreshed listing.
#[utoipa::path(
    delete,
    path = "/v1/videos/{object_id}",
    tag = "Videos",
    summary = "Delete video",
    description = "Submits `delete_video` through the connected wallet, then lists the wallet's videos again.",
    params(
        ("object_id" = String, Path, description = "Ledger object id of the video record"),
    ),
    responses(
        (status = 200, description = "Refreshed listing", body = ListVideosResponse),
        (status = 401, description = "No wallet connected", body = ErrorResponse),
        (status = 502, description = "Transaction or listing failed", body = ErrorResponse),
    )
)]
#[instrument(skip(state))]
pub async fn delete_video(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
) -> Result<Json<ListVideosResponse>, ServerError> {
    let wallet = state.wallet.as_deref().ok_or(AppError::NotConnected)?;
    let entries = state
        .library
        .delete(wallet, &ObjectId::new(object_id))
        .await?;
    Ok(Json(ListVideosResponse::new(&entries, &state.public_origin)))
}
