use anyhow::Context as _;
use clap::Args;

use crate::OutputFormat;
use crate::context::Context;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Account to list (defaults to the connected wallet).
    #[arg(long)]
    pub owner: Option<String>,
}

pub async fn run(ctx: &Context, args: &ListArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let owner = ctx
        .owner(args.owner.as_deref())
        .context("pass --owner or connect a wallet with --signer-url and --address")?;
    let entries = ctx.library().list(&owner).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => super::print_videos(&entries, &ctx.origin),
    }
    Ok(())
}
