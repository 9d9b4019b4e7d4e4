use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use dropit_app::{CostSnapshot, FileUpload};

use crate::OutputFormat;
use crate::context::Context;

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Video file to upload.
    pub file: PathBuf,

    /// Title recorded on chain (defaults to the file name).
    #[arg(long)]
    pub title: Option<String>,
}

pub async fn run(ctx: &Context, args: &UploadArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let data = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .map_or_else(|| "video".to_owned(), |n| n.to_string_lossy().into_owned());

    let mut file = FileUpload::new(file_name, data);
    if let Some(title) = &args.title {
        file = file.with_title(title.clone());
    }

    let cost = match ctx.wallet() {
        Some(wallet) => {
            let size = u64::try_from(file.data.len()).unwrap_or(u64::MAX);
            ctx.estimator()
                .estimate(size, Some(wallet.address().clone()))
                .await
        }
        None => CostSnapshot::default(),
    };
    if let Some(error) = &cost.error {
        eprintln!("warning: {error}");
    }

    let uploader = ctx.uploader();
    let mut progress = uploader.subscribe();
    let reporter = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let text = progress.borrow_and_update().progress_text();
            if !text.is_empty() {
                eprintln!("{text}");
            }
        }
    });

    let result = uploader.upload(ctx.wallet(), file, &cost).await;
    reporter.abort();
    let receipt = result?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
        OutputFormat::Text => {
            println!("Blob ID:    {}", receipt.blob_id);
            println!("Digest:     {}", receipt.digest);
            println!("Share link: {}", receipt.share_link);
        }
    }
    Ok(())
}
