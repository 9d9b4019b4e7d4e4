use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::de::u64_from_string_or_number;
use crate::types::{BlobId, ObjectId, SuiAddress};

/// Fields of an on-chain `video::Video` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VideoRecord {
    /// Display title chosen at upload time (falls back to the file name).
    pub title: String,
    /// Walrus blob holding the video bytes.
    pub blob_id: BlobId,
    /// Account that created the record.
    pub owner: SuiAddress,
    /// Creation time in milliseconds since the Unix epoch.
    ///
    /// The ledger encodes `u64` fields as decimal strings; both forms are
    /// accepted.
    #[serde(deserialize_with = "u64_from_string_or_number")]
    pub created_at: u64,
}

impl VideoRecord {
    /// Calendar date (UTC) the record was created on.
    ///
    /// Returns `None` when the timestamp is out of chrono's range.
    pub fn created_date(&self) -> Option<NaiveDate> {
        let millis = i64::try_from(self.created_at).ok()?;
        DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
    }

    /// Path of the playback page for this record.
    pub fn watch_path(&self) -> String {
        watch_path(&self.blob_id)
    }
}

/// A video record together with the ledger object that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VideoEntry {
    /// Id of the owned `Video` object (the delete target).
    pub object_id: ObjectId,
    /// Decoded object fields.
    #[serde(flatten)]
    pub record: VideoRecord,
}

impl VideoEntry {
    /// Shareable link for this video under the given public origin.
    pub fn share_link(&self, origin: &str) -> String {
        share_link(origin, &self.record.blob_id)
    }
}

/// Path of the playback page for a blob: `/watch/<blob_id>`.
pub fn watch_path(blob_id: &BlobId) -> String {
    format!("/watch/{blob_id}")
}

/// Shareable link `<origin>/watch/<blob_id>`; a trailing slash on the origin is
/// ignored.
pub fn share_link(origin: &str, blob_id: &BlobId) -> String {
    format!("{}{}", origin.trim_end_matches('/'), watch_path(blob_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> VideoRecord {
        VideoRecord {
            title: "Sunset".into(),
            blob_id: BlobId::new("blob-1"),
            owner: SuiAddress::new("0xa11ce"),
            created_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn decodes_ledger_fields_with_string_timestamp() {
        let json = serde_json::json!({
            "title": "Sunset",
            "blob_id": "blob-1",
            "owner": "0xa11ce",
            "created_at": "1700000000000"
        });
        let decoded: VideoRecord = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, record());
    }

    #[test]
    fn decodes_numeric_timestamp() {
        let json = serde_json::json!({
            "title": "t",
            "blob_id": "b",
            "owner": "0x1",
            "created_at": 5
        });
        let decoded: VideoRecord = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.created_at, 5);
    }

    #[test]
    fn created_date_is_utc_calendar_day() {
        let date = record().created_date().unwrap();
        assert_eq!(date.to_string(), "2023-11-14");
    }

    #[test]
    fn share_link_ignores_trailing_slash() {
        let entry = VideoEntry {
            object_id: ObjectId::new("0x9"),
            record: record(),
        };
        assert_eq!(
            entry.share_link("https://dropit.example/"),
            "https://dropit.example/watch/blob-1"
        );
        assert_eq!(entry.record.watch_path(), "/watch/blob-1");
    }

    #[test]
    fn entry_serializes_flat() {
        let entry = VideoEntry {
            object_id: ObjectId::new("0x9"),
            record: record(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["object_id"], "0x9");
        assert_eq!(json["title"], "Sunset");
        assert_eq!(json["created_at"], 1_700_000_000_000_u64);
    }
}
