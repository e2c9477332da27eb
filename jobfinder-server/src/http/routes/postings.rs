//! Listing, lookup and search routes for postings
//!
//! `/api/jobs` and `/api/internships` share one handler; the [`Vertical`]
//! decides which filters apply and what the collection is called.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use jobfinder_core::{ListingRequest, Page, Posting, Vertical};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::http::error::ApiError;
use crate::http::extractors::{ListingQuery, PostingId, SearchBody};
use crate::http::server::AppState;

/// `{ <collection_key>: [...], pagination: {...} }`
#[derive(Debug)]
pub struct Listing {
    collection_key: &'static str,
    page: Page<Posting>,
}

impl Listing {
    pub fn new(vertical: &Vertical, page: Page<Posting>) -> Self {
        Self {
            collection_key: vertical.collection_key,
            page,
        }
    }
}

impl Serialize for Listing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.collection_key, &self.page.items)?;
        map.serialize_entry("pagination", &self.page.meta())?;
        map.end()
    }
}

async fn list(
    state: &AppState,
    vertical: &Vertical,
    request: ListingRequest,
    action: &'static str,
) -> Result<Json<Listing>, ApiError> {
    let page = state
        .store
        .postings()
        .list(&request)
        .await
        .map_err(ApiError::store(action))?;

    tracing::debug!(
        vertical = vertical.name,
        total = page.total,
        returned = page.items.len(),
        "listed postings"
    );
    Ok(Json(Listing::new(vertical, page)))
}

/// GET /api/jobs
async fn list_jobs(
    State(state): State<Arc<AppState>>,
    ListingQuery(params): ListingQuery,
) -> Result<Json<Listing>, ApiError> {
    let vertical = Vertical::JOBS;
    list(&state, &vertical, vertical.parse(&params), "fetch jobs").await
}

/// GET /api/internships
async fn list_internships(
    State(state): State<Arc<AppState>>,
    ListingQuery(params): ListingQuery,
) -> Result<Json<Listing>, ApiError> {
    let vertical = Vertical::INTERNSHIPS;
    list(&state, &vertical, vertical.parse(&params), "fetch internships").await
}

/// POST /api/jobs/search
async fn search_jobs(
    State(state): State<Arc<AppState>>,
    SearchBody(body): SearchBody,
) -> Result<Json<Listing>, ApiError> {
    list(&state, &Vertical::JOBS, body.into_listing_request(), "search jobs").await
}

/// GET /api/jobs/{id}
async fn get_job(
    State(state): State<Arc<AppState>>,
    PostingId(id): PostingId,
) -> Result<Json<Posting>, ApiError> {
    state
        .store
        .postings()
        .get(id)
        .await
        .map_err(ApiError::store("fetch job"))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Job"))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/jobs", get(list_jobs))
        .route("/api/jobs/search", post(search_jobs))
        .route("/api/jobs/{id}", get(get_job))
        .route("/api/internships", get(list_internships))
}
