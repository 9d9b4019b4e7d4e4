use dropit_core::{BlobId, Frost, ObjectId};
use serde::{Deserialize, Serialize};

/// Body returned by `PUT /v1/blobs`.
///
/// Exactly one of the two variants is normally present: `newlyCreated` when
/// the publisher registered a new blob object, `alreadyCertified` when the same
/// content was stored before and is still available.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub newly_created: Option<NewlyCreated>,
    pub already_certified: Option<AlreadyCertified>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewlyCreated {
    pub blob_object: BlobObject,
    pub cost: Option<Frost>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobObject {
    pub id: Option<ObjectId>,
    pub blob_id: Option<BlobId>,
    pub size: Option<u64>,
    pub storage: Option<StorageResource>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageResource {
    pub start_epoch: Option<u64>,
    pub end_epoch: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlreadyCertified {
    pub blob_id: Option<BlobId>,
    pub end_epoch: Option<u64>,
}

/// How the publisher satisfied a store request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreOutcome {
    NewlyCreated,
    AlreadyCertified,
}

/// A blob the publisher has accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBlob {
    pub blob_id: BlobId,
    pub outcome: StoreOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_epoch: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Frost>,
}

impl UploadResponse {
    /// Resolve the stored blob, preferring a newly created object.
    ///
    /// Returns `None` when neither variant carries a non-empty blob id.
    pub fn into_stored_blob(self) -> Option<StoredBlob> {
        if let Some(created) = self.newly_created {
            if let Some(blob_id) = created.blob_object.blob_id.filter(|id| !id.is_empty()) {
                return Some(StoredBlob {
                    blob_id,
                    outcome: StoreOutcome::NewlyCreated,
                    object_id: created.blob_object.id,
                    end_epoch: created.blob_object.storage.and_then(|s| s.end_epoch),
                    cost: created.cost,
                });
            }
        }
        let certified = self.already_certified?;
        let blob_id = certified.blob_id.filter(|id| !id.is_empty())?;
        Some(StoredBlob {
            blob_id,
            outcome: StoreOutcome::AlreadyCertified,
            object_id: None,
            end_epoch: certified.end_epoch,
            cost: None,
        })
    }
}
