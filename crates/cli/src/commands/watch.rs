use clap::Args;
use dropit_app::playback_url;
use dropit_core::{BlobId, share_link};

use crate::OutputFormat;
use crate::context::Context;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Walrus blob id.
    pub blob_id: String,
}

pub fn run(ctx: &Context, args: &WatchArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let url = playback_url(ctx.aggregator_url(), Some(&args.blob_id))?;
    let link = share_link(&ctx.origin, &BlobId::new(args.blob_id.clone()));

    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "blob_id": args.blob_id,
                "playback_url": url,
                "share_link": link,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => {
            println!("Playback:   {url}");
            println!("Share link: {link}");
        }
    }
    Ok(())
}
