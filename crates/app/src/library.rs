//! Listing and deleting the connected account's video records.

use std::sync::Arc;

use dropit_core::constants::{DELETE_VIDEO_FUNCTION, VIDEO_MODULE, VIDEO_STRUCT};
use dropit_core::{ObjectId, PackageId, SuiAddress, VideoEntry, VideoRecord};
use dropit_sui::{CallArg, LedgerReader, MoveCall, ObjectQuery, ObjectResponse, Transaction, WalletSigner};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::error::AppError;

/// Reads and deletes `video::Video` objects of one package.
#[derive(Clone)]
pub struct VideoLibrary {
    ledger: Arc<dyn LedgerReader>,
    package_id: PackageId,
}

impl VideoLibrary {
    pub fn new(ledger: Arc<dyn LedgerReader>, package_id: PackageId) -> Self {
        Self { ledger, package_id }
    }

    /// Move type of the records this library manages.
    pub fn video_type(&self) -> String {
        self.package_id.struct_type(VIDEO_MODULE, VIDEO_STRUCT)
    }

    /// Videos owned by `owner`, in the order the node returns them.
    ///
    /// Only the first page is read. Objects without readable fields are
    /// skipped.
    #[instrument(skip(self), fields(owner = %owner))]
    pub async fn list(&self, owner: &SuiAddress) -> Result<Vec<VideoEntry>, AppError> {
        let query = ObjectQuery::struct_type(self.video_type());
        let page = self.ledger.get_owned_objects(owner, &query).await?;
        let entries: Vec<VideoEntry> = page.data.iter().filter_map(to_entry).collect();
        debug!(count = entries.len(), "videos listed");
        Ok(entries)
    }

    /// Delete one video record, then list again.
    ///
    /// Exactly one transaction is submitted; the listing is refreshed only if
    /// it succeeds.
    #[instrument(skip(self, wallet), fields(owner = %wallet.address(), object_id = %object_id))]
    pub async fn delete(
        &self,
        wallet: &dyn WalletSigner,
        object_id: &ObjectId,
    ) -> Result<Vec<VideoEntry>, AppError> {
        let tx = delete_video_tx(&self.package_id, object_id).with_sender(wallet.address().clone());
        let digest = wallet.sign_and_execute(&tx).await?;
        info!(digest = %digest, "video deleted");
        self.list(wallet.address()).await
    }
}

/// `<package>::video::delete_video(object)`
pub fn delete_video_tx(package_id: &PackageId, object_id: &ObjectId) -> Transaction {
    Transaction::single(
        MoveCall::new(package_id.clone(), VIDEO_MODULE, DELETE_VIDEO_FUNCTION)
            .with_arg(CallArg::object(object_id.clone())),
    )
}

fn to_entry(response: &ObjectResponse) -> Option<VideoEntry> {
    let data = response.data.as_ref()?;
    let fields = data.fields()?;
    match VideoRecord::deserialize(fields) {
        Ok(record) => Some(VideoEntry {
            object_id: data.object_id.clone(),
            record,
        }),
        Err(e) => {
            debug!(object_id = %data.object_id, error = %e, "skipping unreadable video object");
            None
        }
    }
}
