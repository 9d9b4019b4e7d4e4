use anyhow::Context as _;
use clap::Args;
use dropit_core::Frost;
use dropit_core::constants::WAL_COIN_TYPE_MARKER;
use dropit_sui::LedgerReader;

use crate::OutputFormat;
use crate::context::Context;

#[derive(Args, Debug)]
pub struct BalanceArgs {
    /// Account to query (defaults to the connected wallet).
    #[arg(long)]
    pub owner: Option<String>,
}

pub async fn run(ctx: &Context, args: &BalanceArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let owner = ctx
        .owner(args.owner.as_deref())
        .context("pass --owner or connect a wallet with --signer-url and --address")?;
    let balances = ctx.sui.get_all_balances(&owner).await?;
    let wal = balances
        .iter()
        .find(|b| b.coin_type.contains(WAL_COIN_TYPE_MARKER))
        .map_or(Frost::ZERO, |b| b.total_balance);

    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "owner": owner,
                "wal_balance": wal,
                "balances": balances,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => {
            println!("Owner: {owner}");
            println!("WAL:   {wal}");
            for b in &balances {
                println!(
                    "  {} | {} | {} coins",
                    b.coin_type,
                    b.total_balance.as_u64(),
                    b.coin_object_count
                );
            }
        }
    }
    Ok(())
}
