use std::future::IntoFuture;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use dropit_app::DropitConfig;
use dropit_server::config::DropitServerConfig;
use dropit_server::state_factory::build_state;

/// DropIt HTTP server.
#[derive(Parser, Debug)]
#[command(name = "dropit-server", about = "Upload, watch and manage videos stored on Walrus")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "dropit.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from TOML file, or use defaults if the file does not exist.
    let config_found = Path::new(&cli.config).exists();
    let mut config: DropitServerConfig = if config_found {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        toml::from_str("")?
    };

    let telemetry_guard = dropit_server::telemetry::init(&config.telemetry);

    if !config_found {
        warn!(path = %cli.config, "config file not found, using defaults");
    }

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let endpoints = config.endpoints(&DropitConfig::from_env());
    let state = build_state(&config, &endpoints)?;
    let app = dropit_server::api::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, origin = %config.server.public_origin(), "dropit-server listening");

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);
    let (signalled_tx, signalled_rx) = tokio::sync::oneshot::channel::<()>();
    let serve = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signalled_tx.send(());
        })
        .into_future();
    tokio::pin!(serve);

    tokio::select! {
        result = &mut serve => result?,
        Ok(()) = signalled_rx => {
            // In-flight requests (uploads in particular) get a bounded grace period.
            match tokio::time::timeout(shutdown_timeout, &mut serve).await {
                Ok(result) => result?,
                Err(_) => warn!(
                    timeout_secs = config.server.shutdown_timeout_seconds,
                    "graceful shutdown timed out, dropping open connections"
                ),
            }
        }
    }

    telemetry_guard.shutdown();

    info!("dropit-server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
