pub mod balance;
pub mod cost;
pub mod delete;
pub mod download;
pub mod list;
pub mod upload;
pub mod watch;

use dropit_core::VideoEntry;

/// One line per video: title, date, object id and share link.
pub(crate) fn print_videos(entries: &[VideoEntry], origin: &str) {
    if entries.is_empty() {
        println!("No videos yet.");
        return;
    }
    println!("{} videos:", entries.len());
    for entry in entries {
        let date = entry
            .record
            .created_date()
            .map_or_else(|| "-".to_owned(), |d| d.to_string());
        println!(
            "  {title} | {date} | {id} | {link}",
            title = entry.record.title,
            id = entry.object_id,
            link = entry.share_link(origin),
        );
    }
}
