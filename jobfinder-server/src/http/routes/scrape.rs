//! On-demand scraper trigger

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use crate::http::server::AppState;
use crate::ingest::{run_scrape, ScrapeOutcome};

#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(flatten)]
    pub outcome: ScrapeOutcome,
}

/// POST /api/scrape
async fn scrape(State(state): State<Arc<AppState>>) -> Json<ScrapeResponse> {
    tracing::info!("scrape requested");
    let outcome = run_scrape(&state.store, state.scraper.as_ref()).await;

    Json(ScrapeResponse {
        success: true,
        message: "Scraping completed",
        outcome,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/scrape", post(scrape))
}
