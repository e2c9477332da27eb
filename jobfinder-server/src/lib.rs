//! jobfinder-server: SQLite store, scraper and HTTP API for job postings
//!
//! Listing rules (filters, sorting, paging) live in `jobfinder-core`; this
//! crate turns them into SQL and serves the results over axum.

pub mod db;
pub mod http;
pub mod ingest;

pub use db::{DbError, PostingRepo, Stats, Store};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use ingest::{run_scrape, seed_samples, RobotsAwareScraper, ScrapeOutcome, Scraper};
