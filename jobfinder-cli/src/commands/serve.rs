//! HTTP server command

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use jobfinder_core::JobfinderConfig;
use jobfinder_server::{run_server, AppState, RobotsAwareScraper, ServerConfig};

use super::{open_store, DbArgs};

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default from config: 127.0.0.1:3000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    #[command(flatten)]
    pub db: DbArgs,

    /// Directory with the browser client, served for non-API paths
    #[arg(long, value_name = "DIR")]
    pub static_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Run the HTTP server until interrupted
pub async fn run_serve(args: ServeArgs, mut config: JobfinderConfig) -> Result<()> {
    args.db.apply(&mut config);

    let mut server_config =
        ServerConfig::from_config(&config).context("Invalid server address in config")?;
    if let Some(bind) = args.bind {
        server_config.bind_addr = bind;
    }
    if let Some(dir) = args.static_dir {
        server_config.static_dir = Some(dir);
    }
    if let Some(secs) = args.timeout {
        server_config.request_timeout = Duration::from_secs(secs);
    }

    let store = open_store(&config).await?;
    let scraper = RobotsAwareScraper::with_default_sources(&config.scraper)
        .context("Failed to build scraper HTTP client")?;

    tracing::info!("Starting jobfinder server on {}", server_config.bind_addr);
    let state = AppState {
        store: store.clone(),
        scraper: Arc::new(scraper),
    };

    // Blocks until shutdown
    run_server(state, server_config)
        .await
        .context("Server error")?;

    store.close().await;
    Ok(())
}
