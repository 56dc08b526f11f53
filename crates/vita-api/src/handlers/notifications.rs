//! Notification handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use vita_core::Notification;
use vita_gateway::NotificationService;

use crate::extractors::{AuthUser, IdPath};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

const DEFAULT_NOTIFICATION_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    pub limit: Option<i64>,
}

/// List the caller's notifications, newest first
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<NotificationQuery>,
) -> ApiResult<Json<Vec<Notification>>> {
    let limit = query.limit.unwrap_or(DEFAULT_NOTIFICATION_LIMIT);
    let service = NotificationService::new(state.gateway());
    let notifications = service.list(auth.user_id, limit).await?;
    Ok(Json(notifications))
}

/// Mark a notification as read
pub async fn mark_read(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<NoContent> {
    let notification_id = path.id()?;
    let service = NotificationService::new(state.gateway());
    service.mark_read(notification_id).await?;
    Ok(NoContent)
}
