//! Group channel handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use vita_core::{ChatGroup, ChatGroupMessage};
use vita_gateway::{
    AuthService, CreateGroupRequest, GroupMembershipOutcome, GroupService, SendGroupMessageRequest,
};

use crate::extractors::{AuthUser, GroupIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GroupListQuery {
    pub limit: Option<i64>,
}

/// List group channels, newest first
pub async fn list_groups(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<GroupListQuery>,
) -> ApiResult<Json<Vec<ChatGroup>>> {
    let service = GroupService::new(state.gateway());
    let groups = service.groups(query.limit).await?;
    Ok(Json(groups))
}

/// Create a group channel; the creator joins automatically
pub async fn create_group(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateGroupRequest>,
) -> ApiResult<Created<Json<ChatGroup>>> {
    let owner = AuthService::new(state.gateway()).me(auth.user_id).await?;
    let service = GroupService::new(state.gateway());
    let group = service.create_group(&owner, request).await?;
    Ok(Created(Json(group)))
}

/// Join a group channel
pub async fn join_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<GroupIdPath>,
) -> ApiResult<Json<GroupMembershipOutcome>> {
    let group_id = path.group_id()?;
    let service = GroupService::new(state.gateway());
    let outcome = service.join(auth.user_id, group_id).await?;
    Ok(Json(outcome))
}

/// Leave a group channel
pub async fn leave_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<GroupIdPath>,
) -> ApiResult<Json<GroupMembershipOutcome>> {
    let group_id = path.group_id()?;
    let service = GroupService::new(state.gateway());
    let outcome = service.leave(auth.user_id, group_id).await?;
    Ok(Json(outcome))
}

/// Get a group channel's message history, oldest first
pub async fn group_messages(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<GroupIdPath>,
    Query(query): Query<GroupListQuery>,
) -> ApiResult<Json<Vec<ChatGroupMessage>>> {
    let group_id = path.group_id()?;
    let service = GroupService::new(state.gateway());
    let messages = service.messages(group_id, query.limit).await?;
    Ok(Json(messages))
}

/// Post a message into a group channel
pub async fn send_group_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<GroupIdPath>,
    ValidatedJson(request): ValidatedJson<SendGroupMessageRequest>,
) -> ApiResult<Created<Json<ChatGroupMessage>>> {
    let group_id = path.group_id()?;
    let sender = AuthService::new(state.gateway()).me(auth.user_id).await?;
    let service = GroupService::new(state.gateway());
    let message = service.send_message(&sender, group_id, request).await?;
    Ok(Created(Json(message)))
}
