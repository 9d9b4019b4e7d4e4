use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use dropit_core::BlobId;

use crate::OutputFormat;
use crate::context::Context;

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Walrus blob id.
    pub blob_id: String,

    /// File to write (defaults to `<blob_id>.mp4`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn run(ctx: &Context, args: &DownloadArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let blob_id = BlobId::new(args.blob_id.trim());
    if blob_id.is_empty() {
        anyhow::bail!("Invalid video link");
    }
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{blob_id}.mp4")));

    let data = ctx.walrus.read_blob(&blob_id).await?;
    tokio::fs::write(&output, &data)
        .await
        .with_context(|| format!("cannot write {}", output.display()))?;

    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "blob_id": blob_id,
                "path": output.display().to_string(),
                "bytes": data.len(),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => {
            println!("Saved {} bytes to {}", data.len(), output.display());
        }
    }
    Ok(())
}
