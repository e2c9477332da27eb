//! Database maintenance: init, seed and one-off scrapes

use anyhow::{bail, Context, Result};
use jobfinder_core::JobfinderConfig;
use jobfinder_server::{run_scrape, seed_samples, RobotsAwareScraper};

use super::{open_store, DbArgs};

/// Create the database file and schema.
pub async fn run_init(db: DbArgs, mut config: JobfinderConfig) -> Result<()> {
    db.apply(&mut config);
    let store = open_store(&config).await?;
    let existing = store.postings().count_all().await?;
    store.close().await;

    println!(
        "Database ready at {} ({existing} postings)",
        config.database_path.display()
    );
    Ok(())
}

/// Replace all postings with the bundled samples.
pub async fn run_seed(db: DbArgs, mut config: JobfinderConfig) -> Result<()> {
    db.apply(&mut config);
    let store = open_store(&config).await?;
    let inserted = seed_samples(&store)
        .await
        .context("Failed to seed database")?;
    store.close().await;

    println!("Seeded {inserted} sample postings");
    Ok(())
}

/// Scrape the configured boards once and store what was found.
pub async fn run_scrape_once(db: DbArgs, mut config: JobfinderConfig) -> Result<()> {
    db.apply(&mut config);
    let store = open_store(&config).await?;
    let scraper = RobotsAwareScraper::with_default_sources(&config.scraper)
        .context("Failed to build scraper HTTP client")?;

    let outcome = run_scrape(&store, &scraper).await;
    store.close().await;

    println!("Scraped {} postings", outcome.jobs_scraped);
    if !outcome.errors.is_empty() {
        for error in &outcome.errors {
            eprintln!("- {error}");
        }
        bail!("scrape finished with {} error(s)", outcome.errors.len());
    }
    Ok(())
}
