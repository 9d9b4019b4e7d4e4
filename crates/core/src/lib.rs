pub mod constants;
pub mod de;
pub mod frost;
pub mod types;
pub mod video;

pub use frost::{FROST_PER_WAL, Frost, ParseFrostError, format_wal};
pub use types::{BlobId, ObjectId, PackageId, SuiAddress, TransactionDigest};
pub use video::{VideoEntry, VideoRecord, share_link, watch_path};
