//! Dashboard aggregates

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::db::Stats;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /api/stats
async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<Stats>, ApiError> {
    let stats = state
        .store
        .postings()
        .stats()
        .await
        .map_err(ApiError::store("fetch stats"))?;
    Ok(Json(stats))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/stats", get(stats))
}
