use clap::Args;
use dropit_app::AppError;
use dropit_core::ObjectId;

use crate::OutputFormat;
use crate::context::Context;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Object id of the video record.
    pub object_id: String,
}

pub async fn run(ctx: &Context, args: &DeleteArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let wallet = ctx.wallet().ok_or(AppError::NotConnected)?;
    let entries = ctx
        .library()
        .delete(wallet, &ObjectId::new(args.object_id.clone()))
        .await
        .map_err(|e| anyhow::anyhow!("Delete failed: {e}"))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            println!("Deleted {}.", args.object_id);
            super::print_videos(&entries, &ctx.origin);
        }
    }
    Ok(())
}
