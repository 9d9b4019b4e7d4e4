pub mod config;
pub mod cost;
pub mod error;
pub mod library;
pub mod upload;
pub mod watch;

#[cfg(test)]
pub(crate) mod testing;

pub use config::DropitConfig;
pub use cost::{CostEstimator, CostSnapshot};
pub use error::AppError;
pub use library::VideoLibrary;
pub use upload::{FileUpload, UploadReceipt, UploadStage, UploadStatus, Uploader};
pub use watch::playback_url;
