//! User profile handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use vita_core::{Post, UserProfile};
use vita_gateway::{AuthService, ImageUpload, PostService, UpdateProfileRequest};

use crate::extractors::{AuthUser, UserIdPath, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    pub limit: Option<i64>,
}

/// Get the caller's own profile
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserProfile>> {
    let service = AuthService::new(state.gateway());
    let profile = service.me(auth.user_id).await?;
    Ok(Json(profile))
}

/// Update the caller's profile fields
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserProfile>> {
    let service = AuthService::new(state.gateway());
    let profile = service.update_profile(auth.user_id, request).await?;
    Ok(Json(profile))
}

/// Replace the caller's avatar image
pub async fn update_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(upload): Json<ImageUpload>,
) -> ApiResult<Json<UserProfile>> {
    if upload.file_name.is_empty() {
        return Err(ApiError::invalid_query("file_name is required"));
    }
    let service = AuthService::new(state.gateway());
    let profile = service
        .update_avatar(auth.user_id, &upload.file_name, &upload.bytes)
        .await?;
    Ok(Json(profile))
}

/// List a user's posts, newest first
pub async fn user_posts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<UserIdPath>,
    Query(query): Query<PostListQuery>,
) -> ApiResult<Json<Vec<Post>>> {
    let author_id = path.user_id()?;
    let service = PostService::new(state.gateway());
    let posts = service.posts_by_author(author_id, query.limit).await?;
    Ok(Json(posts))
}
