//! Getting postings into the store: bundled samples and scraped batches

pub mod robots;
pub mod scraper;

use async_trait::async_trait;
use jobfinder_core::fixtures::sample_postings;
use jobfinder_core::{normalize, JobfinderError, PostingDraft, RawPosting};
use serde::Serialize;

use crate::db::{DbError, Store};

pub use scraper::{RobotsAwareScraper, ScrapeSource};

/// Raw listings plus human-readable problems from one scraper run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapeBatch {
    pub postings: Vec<RawPosting>,
    pub errors: Vec<String>,
}

/// Source of scraped listings
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Problems are reported in the batch, never raised.
    async fn scrape(&self) -> ScrapeBatch;
}

/// Result of a scrape-and-store run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOutcome {
    /// Postings written to the store
    pub jobs_scraped: u64,
    pub errors: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Fixtures(#[from] JobfinderError),

    #[error(transparent)]
    Store(#[from] DbError),
}

/// Replace the store's contents with the bundled sample postings.
pub async fn seed_samples(store: &Store) -> Result<u64, SeedError> {
    let drafts = sample_postings()?;
    let inserted = store.postings().reset_with(&drafts).await?;
    tracing::info!(inserted, "seeded sample postings");
    Ok(inserted)
}

/// Run `scraper` once, normalize what it found and append it to the store.
///
/// A failed insert becomes an entry in the returned errors.
pub async fn run_scrape(store: &Store, scraper: &dyn Scraper) -> ScrapeOutcome {
    let batch = scraper.scrape().await;
    let mut errors = batch.errors;

    let drafts: Vec<PostingDraft> = batch.postings.into_iter().map(normalize).collect();
    let jobs_scraped = if drafts.is_empty() {
        tracing::info!("no postings to save");
        0
    } else {
        match store.postings().insert_batch(&drafts).await {
            Ok(inserted) => inserted,
            Err(e) => {
                tracing::error!(error = %e, "failed to save scraped postings");
                errors.push(format!("Database: {e}"));
                0
            }
        }
    };

    tracing::info!(jobs_scraped, errors = errors.len(), "scrape finished");
    ScrapeOutcome {
        jobs_scraped,
        errors,
    }
}
