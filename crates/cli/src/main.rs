//! DropIt CLI
//!
//! Estimate storage costs, upload videos to Walrus, and manage the `Video`
//! records owned by your Sui account.

mod commands;
mod context;

use clap::{Parser, Subcommand};
use dropit_core::constants::{
    DEFAULT_AGGREGATOR_URL, DEFAULT_EPOCHS, DEFAULT_PACKAGE_ID, DEFAULT_PUBLISHER_URL,
    DEFAULT_SUI_RPC_URL, TESTNET_WALRUS_SYSTEM_OBJECT,
};
use tracing_subscriber::{EnvFilter, fmt};

use crate::context::Context;

/// DropIt CLI: upload and share videos stored on Walrus.
#[derive(Parser, Debug)]
#[command(name = "dropit", version, about)]
struct Cli {
    /// Sui full node JSON-RPC URL.
    #[arg(long, env = "DROPIT_SUI_RPC_URL", default_value = DEFAULT_SUI_RPC_URL, global = true)]
    rpc_url: String,

    /// Package id of the published `video` module.
    #[arg(long, env = "DROPIT_PACKAGE_ID", default_value = DEFAULT_PACKAGE_ID, global = true)]
    package_id: String,

    /// Walrus publisher base URL.
    #[arg(
        long,
        env = "DROPIT_WALRUS_PUBLISHER_URL",
        default_value = DEFAULT_PUBLISHER_URL,
        global = true
    )]
    publisher_url: String,

    /// Walrus aggregator base URL.
    #[arg(
        long,
        env = "DROPIT_WALRUS_AGGREGATOR_URL",
        default_value = DEFAULT_AGGREGATOR_URL,
        global = true
    )]
    aggregator_url: String,

    /// Walrus system object the storage prices are read from.
    #[arg(
        long,
        env = "DROPIT_WALRUS_SYSTEM_OBJECT",
        default_value = TESTNET_WALRUS_SYSTEM_OBJECT,
        global = true
    )]
    system_object: String,

    /// Storage epochs to pay for.
    #[arg(long, env = "DROPIT_EPOCHS", default_value_t = DEFAULT_EPOCHS, global = true)]
    epochs: u32,

    /// Remote signer endpoint acting as the connected wallet.
    #[arg(long, env = "DROPIT_SIGNER_URL", global = true, requires = "address")]
    signer_url: Option<String>,

    /// Account address the signer holds keys for.
    #[arg(long, env = "DROPIT_ADDRESS", global = true)]
    address: Option<String>,

    /// Bearer token for the signer.
    #[arg(long, env = "DROPIT_SIGNER_TOKEN", global = true, hide_env_values = true)]
    signer_token: Option<String>,

    /// Origin share links are built from.
    #[arg(
        long,
        env = "DROPIT_PUBLIC_ORIGIN",
        default_value = "http://localhost:8080",
        global = true
    )]
    origin: String,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the storage cost of a file and compare it with the WAL balance.
    Cost(commands::cost::CostArgs),
    /// Upload a video to Walrus and record it on Sui.
    Upload(commands::upload::UploadArgs),
    /// List videos owned by an account.
    List(commands::list::ListArgs),
    /// Delete one of the connected wallet's videos.
    Delete(commands::delete::DeleteArgs),
    /// Print the playback URL of a blob.
    WatchUrl(commands::watch::WatchArgs),
    /// Save a blob's bytes from the aggregator to a local file.
    Download(commands::download::DownloadArgs),
    /// Show the coin balances of an account.
    Balance(commands::balance::BalanceArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = Context::from_cli(&cli)?;

    match cli.command {
        Command::Cost(args) => commands::cost::run(&ctx, &args, &cli.format).await,
        Command::Upload(args) => commands::upload::run(&ctx, &args, &cli.format).await,
        Command::List(args) => commands::list::run(&ctx, &args, &cli.format).await,
        Command::Delete(args) => commands::delete::run(&ctx, &args, &cli.format).await,
        Command::WatchUrl(args) => commands::watch::run(&ctx, &args, &cli.format),
        Command::Download(args) => commands::download::run(&ctx, &args, &cli.format).await,
        Command::Balance(args) => commands::balance::run(&ctx, &args, &cli.format).await,
    }
}
