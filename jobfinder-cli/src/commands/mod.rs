//! Subcommand implementations

pub mod data;
pub mod serve;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use jobfinder_core::JobfinderConfig;
use jobfinder_server::Store;

/// Database selection shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct DbArgs {
    /// SQLite database file (overrides config and DATABASE_PATH)
    #[arg(long, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

impl DbArgs {
    pub fn apply(&self, config: &mut JobfinderConfig) {
        if let Some(path) = &self.db_path {
            config.database_path = path.clone();
        }
    }
}

/// Open the configured database, creating it if needed.
pub async fn open_store(config: &JobfinderConfig) -> Result<Store> {
    let path = &config.database_path;
    tracing::info!("Opening database at {}", path.display());
    Store::open(path)
        .await
        .with_context(|| format!("Failed to open database at {}", path.display()))
}
