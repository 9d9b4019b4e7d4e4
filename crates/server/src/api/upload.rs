use axum::Json;
use axum::extract::{Multipart, State};
use dropit_app::FileUpload;
use tracing::instrument;

use super::AppState;
use super::schemas::{ErrorResponse, UploadStatusResponse, UploadVideoResponse};
use crate::error::ServerError;

/// `POST /v1/upload` -- store a video on Walrus and record it on Sui.
#[utoipa::path(
    post,
    path = "/v1/upload",
    tag = "Upload",
    summary = "Upload video",
    description = "Multipart form with a `file` part and an optional `title`. Stores the blob, then submits `create_video` through the connected wallet.",
    request_body(content_type = "multipart/form-data", description = "`file` (binary) and optional `title`"),
    responses(
        (status = 200, description = "Upload complete", body = UploadVideoResponse),
        (status = 400, description = "Missing file part", body = ErrorResponse),
        (status = 401, description = "No wallet connected", body = ErrorResponse),
        (status = 402, description = "Insufficient WAL balance", body = ErrorResponse),
        (status = 409, description = "Another upload is in progress", body = ErrorResponse),
        (status = 502, description = "Walrus or Sui request failed", body = ErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn upload_video(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadVideoResponse>, ServerError> {
    let file = read_upload(multipart).await?;
    let receipt = state.upload(file).await?;
    Ok(Json(receipt.into()))
}

/// `GET /v1/upload/status` -- progress of the current or last upload.
#[utoipa::path(
    get,
    path = "/v1/upload/status",
    tag = "Upload",
    summary = "Upload status",
    responses(
        (status = 200, description = "Uploader state", body = UploadStatusResponse)
    )
)]
pub async fn upload_status(State(state): State<AppState>) -> Json<UploadStatusResponse> {
    Json(state.uploader.status().into())
}

/// Read the `file` and `title` parts of an upload form.
pub(crate) async fn read_upload(mut multipart: Multipart) -> Result<FileUpload, ServerError> {
    let mut file = None;
    let mut title = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("video").to_owned();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::BadRequest(e.body_text()))?;
                file = Some(FileUpload::new(file_name, data));
            }
            Some("title") => {
                title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ServerError::BadRequest(e.body_text()))?,
                );
            }
            _ => {}
        }
    }

    let file = file
        .filter(|f| !f.data.is_empty())
        .ok_or_else(|| ServerError::BadRequest("missing file".to_owned()))?;
    Ok(match title {
        Some(title) => file.with_title(title),
        None => file,
    })
}
