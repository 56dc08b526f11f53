//! Post handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use vita_core::Post;
use vita_gateway::{AuthService, CreatePostRequest, PostService};

use crate::extractors::{AuthUser, PostIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<i64>,
}

/// Get the global feed, newest first
pub async fn feed(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Json<Vec<Post>>> {
    let service = PostService::new(state.gateway());
    let posts = service.feed(query.limit).await?;
    Ok(Json(posts))
}

/// Create a new post
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<Post>>> {
    let author = AuthService::new(state.gateway()).me(auth.user_id).await?;
    let service = PostService::new(state.gateway());
    let post = service.create_post(&author, request).await?;
    Ok(Created(Json(post)))
}

/// Get a single post by ID
pub async fn get_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<Post>> {
    let post_id = path.post_id()?;
    let service = PostService::new(state.gateway());
    let post = service.post(post_id).await?;
    Ok(Json(post))
}

/// Delete one of the caller's posts
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<NoContent> {
    let post_id = path.post_id()?;
    let service = PostService::new(state.gateway());
    service.delete_post(auth.user_id, post_id).await?;
    Ok(NoContent)
}
