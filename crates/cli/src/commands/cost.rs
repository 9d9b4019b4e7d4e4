use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;

use crate::OutputFormat;
use crate::context::Context;

#[derive(Args, Debug)]
pub struct CostArgs {
    /// File to estimate.
    pub file: PathBuf,

    /// Account whose WAL balance is compared (defaults to the connected wallet).
    #[arg(long)]
    pub owner: Option<String>,
}

pub async fn run(ctx: &Context, args: &CostArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let size = tokio::fs::metadata(&args.file)
        .await
        .with_context(|| format!("cannot read {}", args.file.display()))?
        .len();

    let snapshot = ctx
        .estimator()
        .estimate(size, ctx.owner(args.owner.as_deref()))
        .await;

    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "size": size,
                "epochs": ctx.epochs,
                "total_cost": snapshot.total_cost,
                "wal_balance": snapshot.wal_balance,
                "sufficient": snapshot.has_sufficient_balance(),
                "error": snapshot.error,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => {
            println!("File:      {} ({size} bytes)", args.file.display());
            println!("Epochs:    {}", ctx.epochs);
            if let Some(cost) = snapshot.total_cost {
                println!("Cost:      {cost}");
            }
            if let Some(error) = &snapshot.error {
                eprintln!("warning: {error}");
            }
            if let Some(balance) = snapshot.wal_balance {
                println!("Balance:   {balance}");
            }
            if let Some(shortfall) = snapshot.shortfall() {
                println!(
                    "{}",
                    dropit_app::AppError::InsufficientBalance { shortfall }
                );
            }
        }
    }
    Ok(())
}
