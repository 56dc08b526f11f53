//! Friendship handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use vita_core::Friendship;
use vita_gateway::{AuthService, FriendRequestOutcome, FriendshipService};

use crate::extractors::{AuthUser, IdPath, UserIdPath};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub accept: bool,
}

/// List accepted friendships
pub async fn list_friends(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Friendship>>> {
    let service = FriendshipService::new(state.gateway());
    let friends = service.friends(auth.user_id).await?;
    Ok(Json(friends))
}

/// List pending friend requests addressed to the caller
pub async fn pending_requests(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Friendship>>> {
    let service = FriendshipService::new(state.gateway());
    let requests = service.pending_requests(auth.user_id).await?;
    Ok(Json(requests))
}

/// Send a friend request
///
/// If the addressee already has a pending request towards the caller,
/// that request is accepted instead of creating a duplicate edge.
pub async fn send_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Created<Json<FriendRequestOutcome>>> {
    let addressee_id = path.user_id()?;
    let requester = AuthService::new(state.gateway()).me(auth.user_id).await?;
    let service = FriendshipService::new(state.gateway());
    let outcome = service.send_request(&requester, addressee_id).await?;
    Ok(Created(Json(outcome)))
}

/// Accept or decline a pending friend request
pub async fn respond(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
    Json(request): Json<RespondRequest>,
) -> ApiResult<Json<Friendship>> {
    let friendship_id = path.id()?;
    let user = AuthService::new(state.gateway()).me(auth.user_id).await?;
    let service = FriendshipService::new(state.gateway());
    let friendship = service
        .respond(&user, friendship_id, request.accept)
        .await?;
    Ok(Json(friendship))
}

/// Remove a friendship
pub async fn unfriend(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<NoContent> {
    let peer_id = path.user_id()?;
    let service = FriendshipService::new(state.gateway());
    service.unfriend(auth.user_id, peer_id).await?;
    Ok(NoContent)
}
