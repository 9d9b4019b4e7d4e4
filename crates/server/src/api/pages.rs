//! Server-rendered HTML pages: upload, playback and the owner's listing.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use dropit_app::{AppError, UploadStatus, playback_url};
use dropit_core::ObjectId;
use minijinja::context;
use tracing::warn;

use super::AppState;
use super::schemas::VideoSummary;
use super::upload::read_upload;
use crate::error::ServerError;

type PageResult = Result<Response, ServerError>;

fn page(status: StatusCode, body: String) -> Response {
    (status, Html(body)).into_response()
}

fn render_upload(
    state: &AppState,
    status: &UploadStatus,
    error: Option<String>,
    share_link: Option<String>,
) -> Result<String, ServerError> {
    Ok(state.templates.render(
        "upload.html",
        context! {
            wallet => state.wallet_address().map(|a| a.to_string()),
            status,
            progress => status.progress_text(),
            error => error.or_else(|| status.error.clone()),
            share_link => share_link.or_else(|| status.share_link.clone()),
        },
    )?)
}

/// `GET /` -- upload form with live cost estimate.
pub async fn upload_page(State(state): State<AppState>) -> PageResult {
    let status = state.uploader.status();
    Ok(page(StatusCode::OK, render_upload(&state, &status, None, None)?))
}

/// `POST /` -- run the upload and show the outcome inline.
pub async fn upload_submit(State(state): State<AppState>, multipart: Multipart) -> PageResult {
    let outcome = match read_upload(multipart).await {
        Ok(file) => state.upload(file).await,
        Err(e) => Err(e),
    };
    // A refused upload leaves the uploader untouched, so it renders from the
    // pre-existing status plus the refusal message.
    let status = state.uploader.status();
    let (code, body) = match outcome {
        Ok(receipt) => (
            StatusCode::OK,
            render_upload(&state, &status, None, Some(receipt.share_link))?,
        ),
        Err(e) => {
            let code = e.status();
            let message = match e {
                ServerError::App(app) => app.to_string(),
                ServerError::BadRequest(_) => "Select a video to upload".to_owned(),
                other => return Err(other),
            };
            (code, render_upload(&state, &status, Some(message), None)?)
        }
    };
    Ok(page(code, body))
}

/// `GET /watch/{blob_id}` -- video player streaming from the aggregator.
pub async fn watch_page(State(state): State<AppState>, Path(blob_id): Path<String>) -> PageResult {
    render_watch(&state, Some(&blob_id))
}

/// `GET /watch` without a blob id.
pub async fn invalid_link_page(State(state): State<AppState>) -> PageResult {
    render_watch(&state, None)
}

fn render_watch(state: &AppState, blob_id: Option<&str>) -> PageResult {
    let wallet = state.wallet_address().map(|a| a.to_string());
    match playback_url(&state.aggregator_url, blob_id) {
        Ok(url) => {
            let body = state.templates.render(
                "watch.html",
                context! { wallet, blob_id, playback_url => url },
            )?;
            Ok(page(StatusCode::OK, body))
        }
        Err(e) => {
            let body = state
                .templates
                .render("watch.html", context! { wallet, error => e.to_string() })?;
            Ok(page(StatusCode::BAD_REQUEST, body))
        }
    }
}

/// `GET /my` -- videos owned by the connected wallet.
pub async fn my_videos_page(State(state): State<AppState>) -> PageResult {
    render_my_videos(&state, None).await
}

/// `POST /my/{object_id}/delete` -- delete a record, then show the listing.
///
/// A failed delete is shown as a blocking alert over the current listing.
pub async fn delete_submit(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
) -> PageResult {
    let Some(wallet) = state.wallet.as_deref() else {
        return render_my_videos(&state, None).await;
    };
    match state.library.delete(wallet, &ObjectId::new(object_id)).await {
        Ok(entries) => {
            let videos: Vec<VideoSummary> = entries
                .iter()
                .map(|e| VideoSummary::new(e, &state.public_origin))
                .collect();
            let body = state.templates.render(
                "my_videos.html",
                context! {
                    wallet => wallet.address().to_string(),
                    videos,
                },
            )?;
            Ok(page(StatusCode::OK, body))
        }
        Err(e) => {
            warn!(error = %e, "delete failed");
            render_my_videos(&state, Some(format!("Delete failed: {e}"))).await
        }
    }
}

async fn render_my_videos(state: &AppState, alert: Option<String>) -> PageResult {
    let Some(owner) = state.wallet_address() else {
        let body = state
            .templates
            .render("my_videos.html", context! { alert })?;
        return Ok(page(StatusCode::OK, body));
    };

    let (videos, error): (Vec<VideoSummary>, Option<String>) = match state.library.list(owner).await {
        Ok(entries) => (
            entries
                .iter()
                .map(|e| VideoSummary::new(e, &state.public_origin))
                .collect(),
            None,
        ),
        Err(e) => {
            warn!(error = %e, "listing failed");
            (Vec::new(), Some(listing_error(&e)))
        }
    };
    let body = state.templates.render(
        "my_videos.html",
        context! {
            wallet => owner.to_string(),
            videos,
            error,
            alert,
        },
    )?;
    Ok(page(StatusCode::OK, body))
}

fn listing_error(e: &AppError) -> String {
    format!("Failed to load videos: {e}")
}
