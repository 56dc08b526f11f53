//! Comment service

use tracing::{info, instrument, warn};
use validator::Validate;
use vita_core::{
    Comment, DomainError, Notification, NotificationKind, Snowflake, UserProfile,
    MAX_COMMENT_LENGTH,
};

use crate::dto::CreateCommentRequest;

use super::context::GatewayContext;
use super::error::{GatewayError, GatewayResult};
use super::notification::record_notification;
use super::resolve::{resolve_social, resolve_social_or_default};

pub struct CommentService<'a> {
    ctx: &'a GatewayContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a GatewayContext) -> Self {
        Self { ctx }
    }

    /// Add a comment to a post and bump the post's comment counter.
    #[instrument(skip(self, author, request), fields(author_id = %author.id))]
    pub async fn create_comment(
        &self,
        author: &UserProfile,
        post_id: Snowflake,
        request: CreateCommentRequest,
    ) -> GatewayResult<Comment> {
        request
            .validate()
            .map_err(|e| GatewayError::validation(e.to_string()))?;

        let content = request.content.trim();
        if content.is_empty() {
            return Err(GatewayError::validation("Comment cannot be empty"));
        }
        let length = content.chars().count();
        if length > MAX_COMMENT_LENGTH {
            return Err(GatewayError::Domain(DomainError::ContentTooLong {
                length,
                max: MAX_COMMENT_LENGTH,
            }));
        }

        // The post must exist; also gives us the author for the notification.
        let post = resolve_social(self.ctx.social_stores(), "post", move |s| {
            Box::pin(async move { s.post(post_id).await })
        })
        .await?;

        let comment = Comment::new(
            self.ctx.generate_id(),
            post_id,
            author.id,
            author.display_name.clone(),
            content,
        );

        resolve_social(self.ctx.social_stores(), "create_comment", {
            let comment = comment.clone();
            move |s| {
                let comment = comment.clone();
                Box::pin(async move { s.create_comment(&comment).await })
            }
        })
        .await?;

        // The counter is a best-effort denormalization; the comment row is
        // already persisted.
        if let Err(err) =
            resolve_social(self.ctx.social_stores(), "adjust_comment_count", move |s| {
                Box::pin(async move { s.adjust_comment_count(post_id, 1).await })
            })
            .await
        {
            warn!(post_id = %post_id, error = %err, "failed to bump comment counter");
        }

        if post.author_id != author.id {
            let notification = Notification::new(
                self.ctx.generate_id(),
                post.author_id,
                author.id,
                author.display_name.clone(),
                NotificationKind::Comment,
                format!("{} commented on your post", author.display_name),
            )
            .with_subject(post_id);
            record_notification(self.ctx, notification).await;
        }

        info!(comment_id = %comment.id, post_id = %post_id, "comment created");
        Ok(comment)
    }

    /// Comments on a post, oldest first.
    #[instrument(skip(self))]
    pub async fn comments_for_post(&self, post_id: Snowflake) -> GatewayResult<Vec<Comment>> {
        resolve_social_or_default(self.ctx.social_stores(), "comments_for_post", move |s| {
            Box::pin(async move { s.comments_for_post(post_id).await })
        })
        .await
    }

    /// Delete a comment. The comment author or the post author may delete.
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        user_id: Snowflake,
        comment_id: Snowflake,
    ) -> GatewayResult<()> {
        let comment = resolve_social(self.ctx.social_stores(), "comment", move |s| {
            Box::pin(async move { s.comment(comment_id).await })
        })
        .await?;

        if comment.author_id != user_id {
            let post_id = comment.post_id;
            let post = resolve_social(self.ctx.social_stores(), "post", move |s| {
                Box::pin(async move { s.post(post_id).await })
            })
            .await?;
            if post.author_id != user_id {
                return Err(GatewayError::forbidden(
                    "Only the comment author or post author can delete a comment",
                ));
            }
        }

        resolve_social(self.ctx.social_stores(), "delete_comment", move |s| {
            Box::pin(async move { s.delete_comment(comment_id).await })
        })
        .await?;

        let post_id = comment.post_id;
        if let Err(err) =
            resolve_social(self.ctx.social_stores(), "adjust_comment_count", move |s| {
                Box::pin(async move { s.adjust_comment_count(post_id, -1).await })
            })
            .await
        {
            warn!(post_id = %post_id, error = %err, "failed to lower comment counter");
        }

        info!(comment_id = %comment_id, "comment deleted");
        Ok(())
    }
}
