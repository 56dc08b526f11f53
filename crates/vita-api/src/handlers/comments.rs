//! Comment handlers

use axum::{
    extract::{Path, State},
    Json,
};
use vita_core::Comment;
use vita_gateway::{AuthService, CommentService, CreateCommentRequest};

use crate::extractors::{AuthUser, CommentIdPath, PostIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List comments on a post, oldest first
pub async fn list_comments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<Vec<Comment>>> {
    let post_id = path.post_id()?;
    let service = CommentService::new(state.gateway());
    let comments = service.comments_for_post(post_id).await?;
    Ok(Json(comments))
}

/// Add a comment to a post
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<Comment>>> {
    let post_id = path.post_id()?;
    let author = AuthService::new(state.gateway()).me(auth.user_id).await?;
    let service = CommentService::new(state.gateway());
    let comment = service.create_comment(&author, post_id, request).await?;
    Ok(Created(Json(comment)))
}

/// Delete a comment (comment author or post author)
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentIdPath>,
) -> ApiResult<NoContent> {
    let comment_id = path.comment_id()?;
    let service = CommentService::new(state.gateway());
    service.delete_comment(auth.user_id, comment_id).await?;
    Ok(NoContent)
}
