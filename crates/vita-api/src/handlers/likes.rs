//! Like handlers

use axum::{
    extract::{Path, State},
    Json,
};
use vita_gateway::{AuthService, LikeOutcome, LikeService};

use crate::extractors::{AuthUser, PostIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Like a post; liking twice is a no-op
pub async fn like_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<LikeOutcome>> {
    let post_id = path.post_id()?;
    let user = AuthService::new(state.gateway()).me(auth.user_id).await?;
    let service = LikeService::new(state.gateway());
    let outcome = service.like(&user, post_id).await?;
    Ok(Json(outcome))
}

/// Remove a like from a post
pub async fn unlike_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<LikeOutcome>> {
    let post_id = path.post_id()?;
    let service = LikeService::new(state.gateway());
    let outcome = service.unlike(auth.user_id, post_id).await?;
    Ok(Json(outcome))
}
