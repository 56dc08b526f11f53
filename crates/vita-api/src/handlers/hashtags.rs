//! Hashtag handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use vita_gateway::{TrendingService, TrendingTags};

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    pub limit: Option<i64>,
}

/// Get trending hashtags
///
/// Falls back to a curated list when no live data is available.
pub async fn trending(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<TrendingQuery>,
) -> ApiResult<Json<TrendingTags>> {
    let service = TrendingService::new(state.gateway());
    let tags = service.trending(query.limit).await?;
    Ok(Json(tags))
}
