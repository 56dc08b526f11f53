//! Health log handlers

use axum::{extract::State, Json};
use vita_core::{ActivityLog, AppSession, MealLog, SleepLog};
use vita_gateway::{
    HealthLogService, LogActivityRequest, LogAppSessionRequest, LogMealRequest, LogSleepRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Log a meal
pub async fn log_meal(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<LogMealRequest>,
) -> ApiResult<Created<Json<MealLog>>> {
    let service = HealthLogService::new(state.gateway());
    let log = service.log_meal(auth.user_id, request).await?;
    Ok(Created(Json(log)))
}

/// Log a sleep session
pub async fn log_sleep(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<LogSleepRequest>,
) -> ApiResult<Created<Json<SleepLog>>> {
    let service = HealthLogService::new(state.gateway());
    let log = service.log_sleep(auth.user_id, request).await?;
    Ok(Created(Json(log)))
}

/// Log a day's activity
pub async fn log_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<LogActivityRequest>,
) -> ApiResult<Created<Json<ActivityLog>>> {
    let service = HealthLogService::new(state.gateway());
    let log = service.log_activity(auth.user_id, request).await?;
    Ok(Created(Json(log)))
}

/// Log an app usage session
pub async fn log_app_session(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<LogAppSessionRequest>,
) -> ApiResult<Created<Json<AppSession>>> {
    let service = HealthLogService::new(state.gateway());
    let session = service.log_app_session(auth.user_id, request).await?;
    Ok(Created(Json(session)))
}
