//! Like service
//!
//! Likes are idempotent in both directions: liking an already-liked post and
//! unliking a post without a like are no-ops that report the current state.

use tracing::{info, instrument};
use vita_core::{DomainError, Like, Notification, NotificationKind, Snowflake, UserProfile};

use crate::dto::LikeOutcome;

use super::context::GatewayContext;
use super::error::{GatewayError, GatewayResult};
use super::notification::record_notification;
use super::resolve::resolve_social;

pub struct LikeService<'a> {
    ctx: &'a GatewayContext,
}

impl<'a> LikeService<'a> {
    pub fn new(ctx: &'a GatewayContext) -> Self {
        Self { ctx }
    }

    /// Like a post on behalf of `user`.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn like(&self, user: &UserProfile, post_id: Snowflake) -> GatewayResult<LikeOutcome> {
        let post = resolve_social(self.ctx.social_stores(), "post", move |s| {
            Box::pin(async move { s.post(post_id).await })
        })
        .await?;

        let user_id = user.id;
        let exists = resolve_social(self.ctx.social_stores(), "like_exists", move |s| {
            Box::pin(async move { s.like_exists(post_id, user_id).await })
        })
        .await?;
        if exists {
            return Ok(LikeOutcome {
                changed: false,
                like_count: post.like_count,
            });
        }

        let like = Like::new(self.ctx.generate_id(), post_id, user.id);
        let created = resolve_social(self.ctx.social_stores(), "create_like", {
            let like = like.clone();
            move |s| {
                let like = like.clone();
                Box::pin(async move { s.create_like(&like).await })
            }
        })
        .await;

        match created {
            Ok(()) => {}
            // Raced with another request from the same user; treat as already liked.
            Err(GatewayError::Domain(DomainError::DuplicateLike(_))) => {
                return Ok(LikeOutcome {
                    changed: false,
                    like_count: post.like_count,
                });
            }
            Err(err) => return Err(err),
        }

        let like_count =
            resolve_social(self.ctx.social_stores(), "adjust_like_count", move |s| {
                Box::pin(async move { s.adjust_like_count(post_id, 1).await })
            })
            .await?;

        if post.author_id != user.id {
            let notification = Notification::new(
                self.ctx.generate_id(),
                post.author_id,
                user.id,
                user.display_name.clone(),
                NotificationKind::Like,
                format!("{} liked your post", user.display_name),
            )
            .with_subject(post_id);
            record_notification(self.ctx, notification).await;
        }

        info!(post_id = %post_id, like_count, "post liked");
        Ok(LikeOutcome {
            changed: true,
            like_count,
        })
    }

    /// Remove the caller's like from a post.
    #[instrument(skip(self))]
    pub async fn unlike(&self, user_id: Snowflake, post_id: Snowflake) -> GatewayResult<LikeOutcome> {
        let post = resolve_social(self.ctx.social_stores(), "post", move |s| {
            Box::pin(async move { s.post(post_id).await })
        })
        .await?;

        let removed = resolve_social(self.ctx.social_stores(), "delete_like", move |s| {
            Box::pin(async move { s.delete_like(post_id, user_id).await })
        })
        .await?;

        if !removed {
            return Ok(LikeOutcome {
                changed: false,
                like_count: post.like_count,
            });
        }

        let like_count =
            resolve_social(self.ctx.social_stores(), "adjust_like_count", move |s| {
                Box::pin(async move { s.adjust_like_count(post_id, -1).await })
            })
            .await?;

        info!(post_id = %post_id, like_count, "post unliked");
        Ok(LikeOutcome {
            changed: true,
            like_count,
        })
    }
}
