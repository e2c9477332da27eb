//! Extractors that reject with [`ApiError`] instead of axum's plain-text bodies

use std::convert::Infallible;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use jobfinder_core::{ListingParams, SearchRequest};

use super::error::ApiError;

/// Numeric posting id from the path. Anything else is a plain 404.
pub struct PostingId(pub i64);

impl<S> FromRequestParts<S> for PostingId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::not_found("Job"))?;

        raw.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ApiError::not_found("Job"))
    }
}

/// Listing query string. Never rejects: repeated keys keep their last
/// value and an unreadable query string means no filters.
pub struct ListingQuery(pub ListingParams);

impl<S> FromRequestParts<S> for ListingQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pairs = match Query::<Vec<(String, String)>>::from_request_parts(parts, state).await {
            Ok(Query(pairs)) => pairs,
            Err(e) => {
                tracing::debug!(error = %e, "unreadable query string, using defaults");
                Vec::new()
            }
        };
        Ok(Self(ListingParams::from_pairs(pairs)))
    }
}

/// JSON search body
pub struct SearchBody(pub SearchRequest);

impl<S> FromRequest<S> for SearchBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<SearchRequest>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| {
                tracing::debug!(error = %e, "unreadable search body");
                ApiError::bad_request("Invalid search request")
            })?;
        Ok(Self(body))
    }
}
