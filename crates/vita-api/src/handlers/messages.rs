//! Direct message handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use vita_core::{ChatMessage, ConversationSummary};
use vita_gateway::{AuthService, DmService, SendMessageRequest};

use crate::extractors::{AuthUser, UserIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    pub limit: Option<i64>,
}

/// Get the message history with another user
///
/// Fetching a conversation also marks the peer's messages as read.
pub async fn conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
    Query(query): Query<ConversationQuery>,
) -> ApiResult<Json<Vec<ChatMessage>>> {
    let peer_id = path.user_id()?;
    let service = DmService::new(state.gateway());
    let messages = service
        .conversation(auth.user_id, peer_id, query.limit)
        .await?;
    Ok(Json(messages))
}

/// Send a direct message to another user
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<ChatMessage>>> {
    let recipient_id = path.user_id()?;
    let sender = AuthService::new(state.gateway()).me(auth.user_id).await?;
    let service = DmService::new(state.gateway());
    let message = service.send_message(&sender, recipient_id, request).await?;
    Ok(Created(Json(message)))
}

/// Mark all messages from a peer as read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<NoContent> {
    let peer_id = path.user_id()?;
    let service = DmService::new(state.gateway());
    service.mark_read(auth.user_id, peer_id).await?;
    Ok(NoContent)
}

/// List the caller's conversations, most recent first
pub async fn conversations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ConversationSummary>>> {
    let service = DmService::new(state.gateway());
    let summaries = service.conversations(auth.user_id).await?;
    Ok(Json(summaries))
}
