//! Post service
//!
//! Post creation follows a fixed pipeline: validate the content, store the
//! image if one was attached, write the post through the backend chain, then
//! run best-effort side effects (hashtag counters, feed fan-out). Side effect
//! failures are logged and never surfaced to the caller.

use tracing::{info, instrument, warn};
use validator::Validate;
use vita_core::{
    extract_hashtags, normalize_hashtag, DomainError, Notification, NotificationKind, Post,
    Snowflake, UserProfile, MAX_POST_LENGTH,
};

use crate::dto::{CreatePostRequest, ImageUpload};

use super::context::GatewayContext;
use super::error::{GatewayError, GatewayResult};
use super::notification::record_notification;
use super::resolve::{remove_file, resolve_social, resolve_social_or_default, store_file};

/// File extensions accepted for post images
const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

pub struct PostService<'a> {
    ctx: &'a GatewayContext,
}

impl<'a> PostService<'a> {
    pub fn new(ctx: &'a GatewayContext) -> Self {
        Self { ctx }
    }

    /// Create a post authored by `author`.
    #[instrument(skip(self, author, request), fields(author_id = %author.id))]
    pub async fn create_post(
        &self,
        author: &UserProfile,
        request: CreatePostRequest,
    ) -> GatewayResult<Post> {
        request
            .validate()
            .map_err(|e| GatewayError::validation(e.to_string()))?;

        let content = request.content.trim();
        if content.is_empty() && request.image.is_none() {
            return Err(GatewayError::validation(
                "Post needs text content or an image",
            ));
        }
        let length = content.chars().count();
        if length > MAX_POST_LENGTH {
            return Err(GatewayError::Domain(DomainError::ContentTooLong {
                length,
                max: MAX_POST_LENGTH,
            }));
        }

        let id = self.ctx.generate_id();

        let image_url = match &request.image {
            Some(image) => Some(self.store_image(id, image).await?),
            None => None,
        };

        let mut hashtags = extract_hashtags(content);
        for raw in &request.hashtags {
            let tag = normalize_hashtag(raw);
            if !tag.is_empty() && !hashtags.contains(&tag) {
                hashtags.push(tag);
            }
        }

        let mut post = Post::new(id, author.id, author.display_name.clone(), content)
            .with_hashtags(hashtags.clone());
        post.author_avatar_url = author.avatar_url.clone();
        if let Some(url) = image_url {
            post = post.with_image(url);
        }

        resolve_social(self.ctx.social_stores(), "create_post", {
            let post = post.clone();
            move |s| {
                let post = post.clone();
                Box::pin(async move { s.create_post(&post).await })
            }
        })
        .await?;

        // Best-effort side effects from here on.
        let used_at = post.created_at;
        for tag in &hashtags {
            resolve_social(self.ctx.social_stores(), "bump_hashtag", {
                let tag = tag.clone();
                move |s| {
                    let tag = tag.clone();
                    Box::pin(async move { s.bump_hashtag(&tag, used_at).await })
                }
            })
            .await
            .ok();
        }

        if let Some(publisher) = self.ctx.publisher() {
            if let Ok(data) = serde_json::to_value(&post) {
                publisher.publish_post_created(data).await.ok();
            }
        }

        // Every other account gets a new-post notification, best effort.
        match self.ctx.profile_store().all_profile_ids().await {
            Ok(recipients) => {
                for recipient in recipients {
                    if recipient == author.id {
                        continue;
                    }
                    let notification = Notification::new(
                        self.ctx.generate_id(),
                        recipient,
                        author.id,
                        author.display_name.clone(),
                        NotificationKind::NewPost,
                        format!("{} shared a new post", author.display_name),
                    )
                    .with_subject(post.id);
                    record_notification(self.ctx, notification).await;
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to list recipients for new-post fan-out");
            }
        }

        info!(post_id = %post.id, hashtags = hashtags.len(), "post created");
        Ok(post)
    }

    /// Fetch a single post.
    #[instrument(skip(self))]
    pub async fn post(&self, id: Snowflake) -> GatewayResult<Post> {
        resolve_social(self.ctx.social_stores(), "post", move |s| {
            Box::pin(async move { s.post(id).await })
        })
        .await
    }

    /// The global feed, newest first.
    #[instrument(skip(self))]
    pub async fn feed(&self, limit: Option<i64>) -> GatewayResult<Vec<Post>> {
        let limit = limit
            .unwrap_or(self.ctx.social_config().feed_limit)
            .clamp(1, 100);
        resolve_social_or_default(self.ctx.social_stores(), "recent_posts", move |s| {
            Box::pin(async move { s.recent_posts(limit).await })
        })
        .await
    }

    /// Posts by a single author, newest first.
    #[instrument(skip(self))]
    pub async fn posts_by_author(
        &self,
        author_id: Snowflake,
        limit: Option<i64>,
    ) -> GatewayResult<Vec<Post>> {
        let limit = limit
            .unwrap_or(self.ctx.social_config().feed_limit)
            .clamp(1, 100);
        resolve_social_or_default(self.ctx.social_stores(), "posts_by_author", move |s| {
            Box::pin(async move { s.posts_by_author(author_id, limit).await })
        })
        .await
    }

    /// Delete a post. Only the author may delete.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, user_id: Snowflake, post_id: Snowflake) -> GatewayResult<()> {
        let post = self.post(post_id).await?;
        if post.author_id != user_id {
            return Err(GatewayError::forbidden("Only the author can delete a post"));
        }

        resolve_social(self.ctx.social_stores(), "delete_post", move |s| {
            Box::pin(async move { s.delete_post(post_id).await })
        })
        .await?;

        // Best-effort removal of the attached image.
        if let Some(url) = &post.image_url {
            remove_file(self.ctx.file_stores(), url).await;
        }

        info!(post_id = %post_id, "post deleted");
        Ok(())
    }

    async fn store_image(&self, post_id: Snowflake, image: &ImageUpload) -> GatewayResult<String> {
        let ext = image_extension(&image.file_name).ok_or_else(|| {
            GatewayError::validation(format!(
                "Unsupported image type, allowed: {}",
                ALLOWED_IMAGE_EXTENSIONS.join(", ")
            ))
        })?;

        if image.bytes.is_empty() {
            return Err(GatewayError::validation("Image payload is empty"));
        }

        let path = format!("posts/{post_id}.{ext}");
        store_file(self.ctx.file_stores(), &path, &image.bytes).await
    }
}

/// Lower-cased extension of `file_name` when it is an allowed image type.
fn image_extension(file_name: &str) -> Option<String> {
    let ext = std::path::Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extension_whitelist() {
        assert_eq!(image_extension("run.JPG").as_deref(), Some("jpg"));
        assert_eq!(image_extension("meal.webp").as_deref(), Some("webp"));
        assert_eq!(image_extension("notes.txt"), None);
        assert_eq!(image_extension("no_extension"), None);
    }
}
