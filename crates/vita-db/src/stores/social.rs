//! PostgreSQL implementation of SocialStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use vita_core::entities::{
    ChatGroup, ChatGroupMessage, ChatMessage, Comment, Friendship, FriendshipStatus, Hashtag,
    Like, Notification, Post,
};
use vita_core::traits::{SocialStore, StoreResult};
use vita_core::{DomainError, Snowflake};

use crate::error::{map_db_error, map_unique_violation};
use crate::models::{
    CommentModel, FriendshipModel, GroupMessageModel, GroupModel, HashtagModel, LikeModel,
    MessageModel, NotificationModel, PostModel,
};

const POST_COLUMNS: &str = "id, author_id, author_name, author_avatar_url, content, image_url, \
                            hashtags, like_count, comment_count, created_at, updated_at";

/// PostgreSQL implementation of SocialStore
#[derive(Clone)]
pub struct PgSocialStore {
    pool: PgPool,
}

impl PgSocialStore {
    /// Create a new PgSocialStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SocialStore for PgSocialStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    // ========================================================================
    // Posts
    // ========================================================================

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create_post(&self, post: &Post) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, author_name, author_avatar_url, content,
                               image_url, hashtags, like_count, comment_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(post.id.into_inner())
        .bind(post.author_id.into_inner())
        .bind(&post.author_name)
        .bind(post.author_avatar_url.as_deref())
        .bind(&post.content)
        .bind(post.image_url.as_deref())
        .bind(&post.hashtags)
        .bind(post.like_count)
        .bind(post.comment_count)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn post(&self, id: Snowflake) -> StoreResult<Post> {
        let result = sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(Post::from)
            .ok_or_else(|| DomainError::PostNotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn recent_posts(&self, limit: i64) -> StoreResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY id DESC LIMIT $1"
        ))
        .bind(limit.clamp(1, 100))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn posts_by_author(&self, author_id: Snowflake, limit: i64) -> StoreResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE author_id = $1 ORDER BY id DESC LIMIT $2"
        ))
        .bind(author_id.into_inner())
        .bind(limit.clamp(1, 100))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete_post(&self, id: Snowflake) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(id.to_string()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn adjust_like_count(&self, post_id: Snowflake, delta: i64) -> StoreResult<i64> {
        // Single atomic statement, floored at zero
        let count: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE posts
            SET like_count = GREATEST(like_count + $2, 0), updated_at = NOW()
            WHERE id = $1
            RETURNING like_count
            "#,
        )
        .bind(post_id.into_inner())
        .bind(delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        count.ok_or_else(|| DomainError::PostNotFound(post_id.to_string()))
    }

    #[instrument(skip(self))]
    async fn adjust_comment_count(&self, post_id: Snowflake, delta: i64) -> StoreResult<i64> {
        let count: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE posts
            SET comment_count = GREATEST(comment_count + $2, 0), updated_at = NOW()
            WHERE id = $1
            RETURNING comment_count
            "#,
        )
        .bind(post_id.into_inner())
        .bind(delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        count.ok_or_else(|| DomainError::PostNotFound(post_id.to_string()))
    }

    // ========================================================================
    // Comments
    // ========================================================================

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn create_comment(&self, comment: &Comment) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, post_id, author_id, author_name, content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.id.into_inner())
        .bind(comment.post_id.into_inner())
        .bind(comment.author_id.into_inner())
        .bind(&comment.author_name)
        .bind(&comment.content)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn comment(&self, id: Snowflake) -> StoreResult<Comment> {
        let result = sqlx::query_as::<_, CommentModel>(
            "SELECT id, post_id, author_id, author_name, content, created_at
             FROM comments WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(Comment::from)
            .ok_or_else(|| DomainError::CommentNotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn comments_for_post(&self, post_id: Snowflake) -> StoreResult<Vec<Comment>> {
        let results = sqlx::query_as::<_, CommentModel>(
            "SELECT id, post_id, author_id, author_name, content, created_at
             FROM comments WHERE post_id = $1 ORDER BY id ASC",
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete_comment(&self, id: Snowflake) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CommentNotFound(id.to_string()));
        }
        Ok(())
    }

    // ========================================================================
    // Likes
    // ========================================================================

    #[instrument(skip(self))]
    async fn like_exists(&self, post_id: Snowflake, user_id: Snowflake) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE post_id = $1 AND user_id = $2)",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self, like), fields(post_id = %like.post_id, user_id = %like.user_id))]
    async fn create_like(&self, like: &Like) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO likes (id, post_id, user_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(like.id.into_inner())
        .bind(like.post_id.into_inner())
        .bind(like.user_id.into_inner())
        .bind(like.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::DuplicateLike(like.post_id.to_string()))
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_like(&self, post_id: Snowflake, user_id: Snowflake) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    // ========================================================================
    // Direct messages
    // ========================================================================

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create_message(&self, message: &ChatMessage) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO direct_messages (id, sender_id, sender_name, recipient_id, content, is_sticker, read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(message.id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(&message.sender_name)
        .bind(message.recipient_id.into_inner())
        .bind(&message.content)
        .bind(message.is_sticker)
        .bind(message.read)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn messages_between(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<ChatMessage>> {
        let results = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, sender_id, sender_name, recipient_id, content, is_sticker, read, created_at
            FROM direct_messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            ORDER BY id ASC
            LIMIT $3
            "#,
        )
        .bind(user_a.into_inner())
        .bind(user_b.into_inner())
        .bind(limit.clamp(1, 500))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ChatMessage::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_messages_from(
        &self,
        sender: Snowflake,
        recipient: Snowflake,
    ) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM direct_messages WHERE sender_id = $1 AND recipient_id = $2",
        )
        .bind(sender.into_inner())
        .bind(recipient.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn mark_messages_read(&self, user: Snowflake, peer: Snowflake) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE direct_messages
            SET read = TRUE
            WHERE recipient_id = $1 AND sender_id = $2 AND read = FALSE
            "#,
        )
        .bind(user.into_inner())
        .bind(peer.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn unread_count(&self, user: Snowflake) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM direct_messages WHERE recipient_id = $1 AND read = FALSE",
        )
        .bind(user.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn messages_involving(
        &self,
        user: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<ChatMessage>> {
        let results = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, sender_id, sender_name, recipient_id, content, is_sticker, read, created_at
            FROM direct_messages
            WHERE sender_id = $1 OR recipient_id = $1
            ORDER BY id DESC
            LIMIT $2
            "#,
        )
        .bind(user.into_inner())
        .bind(limit.clamp(1, 1000))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ChatMessage::from).collect())
    }

    // ========================================================================
    // Group channels
    // ========================================================================

    #[instrument(skip(self, group), fields(group_id = %group.id))]
    async fn create_group(&self, group: &ChatGroup) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO chat_groups (id, name, owner_id, member_count, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(group.id.into_inner())
        .bind(&group.name)
        .bind(group.owner_id.into_inner())
        .bind(group.member_count)
        .bind(group.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn group(&self, id: Snowflake) -> StoreResult<ChatGroup> {
        let result = sqlx::query_as::<_, GroupModel>(
            "SELECT id, name, owner_id, member_count, created_at FROM chat_groups WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(ChatGroup::from)
            .ok_or_else(|| DomainError::GroupNotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn groups(&self, limit: i64) -> StoreResult<Vec<ChatGroup>> {
        let results = sqlx::query_as::<_, GroupModel>(
            "SELECT id, name, owner_id, member_count, created_at
             FROM chat_groups ORDER BY id DESC LIMIT $1",
        )
        .bind(limit.clamp(1, 100))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ChatGroup::from).collect())
    }

    #[instrument(skip(self))]
    async fn add_group_member(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
    ) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO chat_group_members (group_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (group_id, user_id) DO NOTHING
            "#,
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn remove_group_member(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
    ) -> StoreResult<bool> {
        let result =
            sqlx::query("DELETE FROM chat_group_members WHERE group_id = $1 AND user_id = $2")
                .bind(group_id.into_inner())
                .bind(user_id.into_inner())
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn adjust_group_member_count(
        &self,
        group_id: Snowflake,
        delta: i64,
    ) -> StoreResult<i64> {
        let count: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE chat_groups
            SET member_count = GREATEST(member_count + $2, 0)
            WHERE id = $1
            RETURNING member_count
            "#,
        )
        .bind(group_id.into_inner())
        .bind(delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        count.ok_or_else(|| DomainError::GroupNotFound(group_id.to_string()))
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create_group_message(&self, message: &ChatGroupMessage) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO chat_group_messages (id, group_id, sender_id, sender_name, content,
                                             is_sticker, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(message.id.into_inner())
        .bind(message.group_id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(&message.sender_name)
        .bind(&message.content)
        .bind(message.is_sticker)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn group_messages(
        &self,
        group_id: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<ChatGroupMessage>> {
        let results = sqlx::query_as::<_, GroupMessageModel>(
            r#"
            SELECT id, group_id, sender_id, sender_name, content, is_sticker, created_at
            FROM chat_group_messages
            WHERE group_id = $1
            ORDER BY id ASC
            LIMIT $2
            "#,
        )
        .bind(group_id.into_inner())
        .bind(limit.clamp(1, 500))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ChatGroupMessage::from).collect())
    }

    // ========================================================================
    // Friendships
    // ========================================================================

    #[instrument(skip(self, friendship), fields(friendship_id = %friendship.id))]
    async fn create_friendship(&self, friendship: &Friendship) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO friendships (id, requester_id, addressee_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(friendship.id.into_inner())
        .bind(friendship.requester_id.into_inner())
        .bind(friendship.addressee_id.into_inner())
        .bind(friendship.status.as_str())
        .bind(friendship.created_at)
        .bind(friendship.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::FriendshipExists(
                    friendship.requester_id.to_string(),
                    friendship.addressee_id.to_string(),
                )
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn friendship(&self, id: Snowflake) -> StoreResult<Friendship> {
        let result = sqlx::query_as::<_, FriendshipModel>(
            "SELECT id, requester_id, addressee_id, status, created_at, updated_at
             FROM friendships WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(Friendship::from)
            .ok_or_else(|| DomainError::FriendshipNotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn friendship_between(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
    ) -> StoreResult<Option<Friendship>> {
        let result = sqlx::query_as::<_, FriendshipModel>(
            r#"
            SELECT id, requester_id, addressee_id, status, created_at, updated_at
            FROM friendships
            WHERE (requester_id = $1 AND addressee_id = $2)
               OR (requester_id = $2 AND addressee_id = $1)
            LIMIT 1
            "#,
        )
        .bind(user_a.into_inner())
        .bind(user_b.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Friendship::from))
    }

    #[instrument(skip(self))]
    async fn set_friendship_status(
        &self,
        id: Snowflake,
        status: FriendshipStatus,
    ) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE friendships SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::FriendshipNotFound(id.to_string()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn friendships_of(
        &self,
        user_id: Snowflake,
        status: Option<FriendshipStatus>,
    ) -> StoreResult<Vec<Friendship>> {
        let results = match status {
            Some(status) => {
                sqlx::query_as::<_, FriendshipModel>(
                    r#"
                    SELECT id, requester_id, addressee_id, status, created_at, updated_at
                    FROM friendships
                    WHERE (requester_id = $1 OR addressee_id = $1) AND status = $2
                    ORDER BY id DESC
                    "#,
                )
                .bind(user_id.into_inner())
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, FriendshipModel>(
                    r#"
                    SELECT id, requester_id, addressee_id, status, created_at, updated_at
                    FROM friendships
                    WHERE requester_id = $1 OR addressee_id = $1
                    ORDER BY id DESC
                    "#,
                )
                .bind(user_id.into_inner())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Friendship::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete_friendship(&self, id: Snowflake) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM friendships WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::FriendshipNotFound(id.to_string()));
        }
        Ok(())
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    #[instrument(skip(self, notification), fields(notification_id = %notification.id))]
    async fn create_notification(&self, notification: &Notification) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, recipient_id, actor_id, actor_name, kind, body,
                                       subject_id, read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(notification.id.into_inner())
        .bind(notification.recipient_id.into_inner())
        .bind(notification.actor_id.into_inner())
        .bind(&notification.actor_name)
        .bind(notification.kind.as_str())
        .bind(&notification.body)
        .bind(notification.subject_id.map(Snowflake::into_inner))
        .bind(notification.read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn notifications_for(
        &self,
        recipient_id: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<Notification>> {
        let results = sqlx::query_as::<_, NotificationModel>(
            r#"
            SELECT id, recipient_id, actor_id, actor_name, kind, body, subject_id, read, created_at
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY id DESC
            LIMIT $2
            "#,
        )
        .bind(recipient_id.into_inner())
        .bind(limit.clamp(1, 100))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Notification::from).collect())
    }

    #[instrument(skip(self))]
    async fn mark_notification_read(&self, id: Snowflake) -> StoreResult<()> {
        let result = sqlx::query("UPDATE notifications SET read = TRUE WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotificationNotFound(id.to_string()));
        }
        Ok(())
    }

    // ========================================================================
    // Hashtags
    // ========================================================================

    #[instrument(skip(self))]
    async fn bump_hashtag(&self, name: &str, at: DateTime<Utc>) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO hashtags (name, use_count, last_used_at)
            VALUES ($1, 1, $2)
            ON CONFLICT (name)
            DO UPDATE SET use_count = hashtags.use_count + 1, last_used_at = EXCLUDED.last_used_at
            RETURNING use_count
            "#,
        )
        .bind(name)
        .bind(at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn trending_hashtags(&self, limit: i64) -> StoreResult<Vec<Hashtag>> {
        let results = sqlx::query_as::<_, HashtagModel>(
            r#"
            SELECT name, use_count, last_used_at
            FROM hashtags
            ORDER BY use_count DESC, last_used_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit.clamp(1, 50))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Hashtag::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgSocialStore>();
    }
}
