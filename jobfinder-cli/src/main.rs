//! jobfinder CLI - student job and internship listings
//!
//! Entry point for the `jobfinder` binary:
//! - `serve`: JSON API and optional static client
//! - `seed`: load the bundled sample postings
//! - `scrape`: run the robots.txt-aware scraper once
//! - `init`: create the database and schema

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jobfinder_core::JobfinderConfig;

mod commands;
mod tracing_setup;

use commands::DbArgs;

#[derive(Parser, Debug)]
#[command(
    name = "jobfinder",
    author,
    version,
    about = "Search and serve student-friendly job and internship postings",
    long_about = "Stores postings in SQLite, exposes a filterable JSON API with pagination, \
                  and can seed sample data or scrape job boards politely (robots.txt aware)."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    /// TOML config file (default: ./jobfinder.toml if present)
    #[arg(long, short = 'c', global = true, value_name = "PATH", env = "JOBFINDER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Replace all postings with the bundled sample data
    Seed(DbArgs),
    /// Scrape job boards once and store the results
    Scrape(DbArgs),
    /// Create the database and schema without loading data
    Init(DbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let config = JobfinderConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args, config).await,
        Commands::Seed(db) => commands::data::run_seed(db, config).await,
        Commands::Scrape(db) => commands::data::run_scrape_once(db, config).await,
        Commands::Init(db) => commands::data::run_init(db, config).await,
    }
}
