//! Route handlers organized by resource

pub mod health;
pub mod postings;
pub mod scrape;
pub mod stats;
