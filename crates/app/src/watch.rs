use dropit_core::BlobId;

use crate::error::AppError;

/// Playback URL for a blob: `{aggregator}/v1/blobs/<blob_id>`.
///
/// An absent or empty blob id is an invalid link.
pub fn playback_url(aggregator: &str, blob_id: Option<&str>) -> Result<String, AppError> {
    let blob_id = blob_id
        .filter(|id| !id.is_empty())
        .map(BlobId::from)
        .ok_or(AppError::InvalidLink)?;
    Ok(format!(
        "{}/v1/blobs/{blob_id}",
        aggregator.trim_end_matches('/')
    ))
}
