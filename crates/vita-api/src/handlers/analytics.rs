//! Analytics dashboard handlers
//!
//! Each endpoint returns a per-day summary over a trailing window.
//! Windows with no logged data come back as synthetic series flagged
//! `synthetic` so clients can label the charts.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use vita_analytics::{ActivitySummary, AppUsageSummary, NutritionSummary, SleepSummary};

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DaysQuery {
    pub days: Option<u32>,
}

/// Nutrition summary over the trailing window
pub async fn nutrition(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DaysQuery>,
) -> ApiResult<Json<NutritionSummary>> {
    let summary = state
        .analytics()
        .nutrition_summary(auth.user_id, query.days)
        .await?;
    Ok(Json(summary))
}

/// Sleep summary over the trailing window
pub async fn sleep(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DaysQuery>,
) -> ApiResult<Json<SleepSummary>> {
    let summary = state
        .analytics()
        .sleep_summary(auth.user_id, query.days)
        .await?;
    Ok(Json(summary))
}

/// Activity summary over the trailing window
pub async fn activity(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DaysQuery>,
) -> ApiResult<Json<ActivitySummary>> {
    let summary = state
        .analytics()
        .activity_summary(auth.user_id, query.days)
        .await?;
    Ok(Json(summary))
}

/// App usage summary over the trailing window
pub async fn app_usage(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DaysQuery>,
) -> ApiResult<Json<AppUsageSummary>> {
    let summary = state
        .analytics()
        .app_usage_summary(auth.user_id, query.days)
        .await?;
    Ok(Json(summary))
}
