//! Redis document implementation of SocialStore
//!
//! Entities are JSON documents, ordered access goes through sorted sets
//! scored by Snowflake ID (IDs are time-ordered, so score order is creation
//! order). Post counters live in a per-post hash and are adjusted with a
//! server-side script that floors at zero, so concurrent likes and unlikes
//! never lose updates or go negative.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use redis::{AsyncCommands, Script};
use std::sync::OnceLock;
use tracing::instrument;

use vita_core::entities::{
    ChatGroup, ChatGroupMessage, ChatMessage, Comment, Friendship, FriendshipStatus, Hashtag,
    Like, Notification, Post,
};
use vita_core::traits::{SocialStore, StoreResult};
use vita_core::{DomainError, Snowflake};

use crate::error::map_redis_error;
use crate::keys;
use crate::pool::{RedisPool, RedisPoolError};

const LIKE_FIELD: &str = "like_count";
const COMMENT_FIELD: &str = "comment_count";
const MEMBER_FIELD: &str = "member_count";

/// HINCRBY with a floor at zero, returns the new value.
fn floored_incr_script() -> &'static Script {
    static SCRIPT: OnceLock<Script> = OnceLock::new();
    SCRIPT.get_or_init(|| {
        Script::new(
            r"
            local v = redis.call('HINCRBY', KEYS[1], ARGV[1], ARGV[2])
            if v < 0 then
                redis.call('HSET', KEYS[1], ARGV[1], 0)
                return 0
            end
            return v
            ",
        )
    })
}

fn rerr(e: redis::RedisError) -> DomainError {
    map_redis_error(RedisPoolError::Redis(e))
}

/// Redis document implementation of SocialStore
#[derive(Clone)]
pub struct DocSocialStore {
    pool: RedisPool,
}

impl DocSocialStore {
    /// Create a new DocSocialStore
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// IDs from a sorted set, ascending by score.
    async fn zrange_ids(&self, key: &str, limit: i64) -> StoreResult<Vec<i64>> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let stop = if limit > 0 { limit - 1 } else { -1 };
        let ids: Vec<i64> = conn.zrange(key, 0, stop as isize).await.map_err(rerr)?;
        Ok(ids)
    }

    /// IDs from a sorted set, descending by score.
    async fn zrevrange_ids(&self, key: &str, limit: i64) -> StoreResult<Vec<i64>> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let stop = if limit > 0 { limit - 1 } else { -1 };
        let ids: Vec<i64> = conn
            .zrevrange(key, 0, stop as isize)
            .await
            .map_err(rerr)?;
        Ok(ids)
    }

    /// Load post documents and overlay their authoritative counters.
    async fn hydrate_posts(&self, ids: &[i64]) -> StoreResult<Vec<Post>> {
        let doc_keys: Vec<String> = ids.iter().map(|&id| keys::post(Snowflake::new(id))).collect();
        let mut posts: Vec<Post> = self
            .pool
            .get_docs(&doc_keys)
            .await
            .map_err(map_redis_error)?;

        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        for post in &mut posts {
            let (likes, comments): (Option<i64>, Option<i64>) = conn
                .hget(keys::post_counters(post.id), (LIKE_FIELD, COMMENT_FIELD))
                .await
                .map_err(rerr)?;
            post.like_count = likes.unwrap_or(post.like_count);
            post.comment_count = comments.unwrap_or(post.comment_count);
        }
        Ok(posts)
    }

    async fn adjust_counter(
        &self,
        post_id: Snowflake,
        field: &str,
        delta: i64,
    ) -> StoreResult<i64> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;

        let exists: bool = conn.exists(keys::post(post_id)).await.map_err(rerr)?;
        if !exists {
            return Err(DomainError::PostNotFound(post_id.to_string()));
        }

        let count: i64 = floored_incr_script()
            .key(keys::post_counters(post_id))
            .arg(field)
            .arg(delta)
            .invoke_async(&mut conn)
            .await
            .map_err(rerr)?;
        Ok(count)
    }
}

#[async_trait]
impl SocialStore for DocSocialStore {
    fn name(&self) -> &'static str {
        "redis-doc"
    }

    // ========================================================================
    // Posts
    // ========================================================================

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create_post(&self, post: &Post) -> StoreResult<()> {
        self.pool
            .put_doc(&keys::post(post.id), post)
            .await
            .map_err(map_redis_error)?;

        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let id = post.id.into_inner();
        let _: () = conn
            .hset_multiple(
                keys::post_counters(post.id),
                &[(LIKE_FIELD, post.like_count), (COMMENT_FIELD, post.comment_count)],
            )
            .await
            .map_err(rerr)?;
        let _: () = conn
            .zadd(keys::recent_posts(), id, id)
            .await
            .map_err(rerr)?;
        let _: () = conn
            .zadd(keys::posts_by_author(post.author_id), id, id)
            .await
            .map_err(rerr)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn post(&self, id: Snowflake) -> StoreResult<Post> {
        let posts = self.hydrate_posts(&[id.into_inner()]).await?;
        posts
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::PostNotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn recent_posts(&self, limit: i64) -> StoreResult<Vec<Post>> {
        let ids = self.zrevrange_ids(&keys::recent_posts(), limit).await?;
        self.hydrate_posts(&ids).await
    }

    #[instrument(skip(self))]
    async fn posts_by_author(&self, author_id: Snowflake, limit: i64) -> StoreResult<Vec<Post>> {
        let ids = self
            .zrevrange_ids(&keys::posts_by_author(author_id), limit)
            .await?;
        self.hydrate_posts(&ids).await
    }

    #[instrument(skip(self))]
    async fn delete_post(&self, id: Snowflake) -> StoreResult<()> {
        let post: Post = self
            .pool
            .get_doc(&keys::post(id))
            .await
            .map_err(map_redis_error)?
            .ok_or_else(|| DomainError::PostNotFound(id.to_string()))?;

        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let raw = id.into_inner();
        let _: () = conn.del(keys::post(id)).await.map_err(rerr)?;
        let _: () = conn.del(keys::post_counters(id)).await.map_err(rerr)?;
        let _: () = conn.del(keys::post_likes(id)).await.map_err(rerr)?;
        let _: () = conn
            .zrem(keys::recent_posts(), raw)
            .await
            .map_err(rerr)?;
        let _: () = conn
            .zrem(keys::posts_by_author(post.author_id), raw)
            .await
            .map_err(rerr)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn adjust_like_count(&self, post_id: Snowflake, delta: i64) -> StoreResult<i64> {
        self.adjust_counter(post_id, LIKE_FIELD, delta).await
    }

    #[instrument(skip(self))]
    async fn adjust_comment_count(&self, post_id: Snowflake, delta: i64) -> StoreResult<i64> {
        self.adjust_counter(post_id, COMMENT_FIELD, delta).await
    }

    // ========================================================================
    // Comments
    // ========================================================================

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn create_comment(&self, comment: &Comment) -> StoreResult<()> {
        self.pool
            .put_doc(&keys::comment(comment.id), comment)
            .await
            .map_err(map_redis_error)?;

        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let id = comment.id.into_inner();
        let _: () = conn
            .zadd(keys::comments_by_post(comment.post_id), id, id)
            .await
            .map_err(rerr)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn comment(&self, id: Snowflake) -> StoreResult<Comment> {
        self.pool
            .get_doc(&keys::comment(id))
            .await
            .map_err(map_redis_error)?
            .ok_or_else(|| DomainError::CommentNotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn comments_for_post(&self, post_id: Snowflake) -> StoreResult<Vec<Comment>> {
        let ids = self.zrange_ids(&keys::comments_by_post(post_id), -1).await?;
        let doc_keys: Vec<String> = ids
            .iter()
            .map(|&id| keys::comment(Snowflake::new(id)))
            .collect();
        self.pool.get_docs(&doc_keys).await.map_err(map_redis_error)
    }

    #[instrument(skip(self))]
    async fn delete_comment(&self, id: Snowflake) -> StoreResult<()> {
        let comment: Comment = self
            .pool
            .get_doc(&keys::comment(id))
            .await
            .map_err(map_redis_error)?
            .ok_or_else(|| DomainError::CommentNotFound(id.to_string()))?;

        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let _: () = conn.del(keys::comment(id)).await.map_err(rerr)?;
        let _: () = conn
            .zrem(keys::comments_by_post(comment.post_id), id.into_inner())
            .await
            .map_err(rerr)?;
        Ok(())
    }

    // ========================================================================
    // Likes
    // ========================================================================

    #[instrument(skip(self))]
    async fn like_exists(&self, post_id: Snowflake, user_id: Snowflake) -> StoreResult<bool> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let exists: bool = conn
            .sismember(keys::post_likes(post_id), user_id.into_inner())
            .await
            .map_err(rerr)?;
        Ok(exists)
    }

    #[instrument(skip(self, like), fields(post_id = %like.post_id, user_id = %like.user_id))]
    async fn create_like(&self, like: &Like) -> StoreResult<()> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let added: i64 = conn
            .sadd(keys::post_likes(like.post_id), like.user_id.into_inner())
            .await
            .map_err(rerr)?;
        if added == 0 {
            return Err(DomainError::DuplicateLike(like.post_id.to_string()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_like(&self, post_id: Snowflake, user_id: Snowflake) -> StoreResult<bool> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let removed: i64 = conn
            .srem(keys::post_likes(post_id), user_id.into_inner())
            .await
            .map_err(rerr)?;
        Ok(removed > 0)
    }

    // ========================================================================
    // Direct messages
    // ========================================================================

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create_message(&self, message: &ChatMessage) -> StoreResult<()> {
        self.pool
            .put_doc(&keys::message(message.id), message)
            .await
            .map_err(map_redis_error)?;

        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let id = message.id.into_inner();
        let _: () = conn
            .zadd(keys::message_pair(message.sender_id, message.recipient_id), id, id)
            .await
            .map_err(rerr)?;
        let _: () = conn
            .zadd(keys::messages_by_user(message.sender_id), id, id)
            .await
            .map_err(rerr)?;
        let _: () = conn
            .zadd(keys::messages_by_user(message.recipient_id), id, id)
            .await
            .map_err(rerr)?;
        let _: () = conn
            .incr(keys::sent_count(message.sender_id, message.recipient_id), 1)
            .await
            .map_err(rerr)?;
        if !message.read {
            let _: () = conn
                .hincr(
                    keys::unread_by_peer(message.recipient_id),
                    message.sender_id.into_inner(),
                    1,
                )
                .await
                .map_err(rerr)?;
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn messages_between(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<ChatMessage>> {
        let ids = self
            .zrange_ids(&keys::message_pair(user_a, user_b), limit)
            .await?;
        let doc_keys: Vec<String> = ids
            .iter()
            .map(|&id| keys::message(Snowflake::new(id)))
            .collect();
        self.pool.get_docs(&doc_keys).await.map_err(map_redis_error)
    }

    #[instrument(skip(self))]
    async fn count_messages_from(
        &self,
        sender: Snowflake,
        recipient: Snowflake,
    ) -> StoreResult<i64> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let count: Option<i64> = conn
            .get(keys::sent_count(sender, recipient))
            .await
            .map_err(rerr)?;
        Ok(count.unwrap_or(0))
    }

    #[instrument(skip(self))]
    async fn mark_messages_read(&self, user: Snowflake, peer: Snowflake) -> StoreResult<()> {
        let messages = self.messages_between(user, peer, -1).await?;

        for mut message in messages {
            if message.recipient_id == user && message.sender_id == peer && !message.read {
                message.read = true;
                self.pool
                    .put_doc(&keys::message(message.id), &message)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let _: () = conn
            .hdel(keys::unread_by_peer(user), peer.into_inner())
            .await
            .map_err(rerr)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn unread_count(&self, user: Snowflake) -> StoreResult<i64> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let counts: Vec<i64> = conn
            .hvals(keys::unread_by_peer(user))
            .await
            .map_err(rerr)?;
        Ok(counts.into_iter().sum())
    }

    #[instrument(skip(self))]
    async fn messages_involving(
        &self,
        user: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<ChatMessage>> {
        let ids = self
            .zrevrange_ids(&keys::messages_by_user(user), limit)
            .await?;
        let doc_keys: Vec<String> = ids
            .iter()
            .map(|&id| keys::message(Snowflake::new(id)))
            .collect();
        self.pool.get_docs(&doc_keys).await.map_err(map_redis_error)
    }

    // ========================================================================
    // Group channels
    // ========================================================================

    #[instrument(skip(self, group), fields(group_id = %group.id))]
    async fn create_group(&self, group: &ChatGroup) -> StoreResult<()> {
        self.pool
            .put_doc(&keys::group(group.id), group)
            .await
            .map_err(map_redis_error)?;

        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let id = group.id.into_inner();
        let _: () = conn
            .hset(keys::group_counters(group.id), MEMBER_FIELD, group.member_count)
            .await
            .map_err(rerr)?;
        let _: () = conn.zadd(keys::groups(), id, id).await.map_err(rerr)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn group(&self, id: Snowflake) -> StoreResult<ChatGroup> {
        let mut group: ChatGroup = self
            .pool
            .get_doc(&keys::group(id))
            .await
            .map_err(map_redis_error)?
            .ok_or_else(|| DomainError::GroupNotFound(id.to_string()))?;

        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let members: Option<i64> = conn
            .hget(keys::group_counters(id), MEMBER_FIELD)
            .await
            .map_err(rerr)?;
        group.member_count = members.unwrap_or(group.member_count);
        Ok(group)
    }

    #[instrument(skip(self))]
    async fn groups(&self, limit: i64) -> StoreResult<Vec<ChatGroup>> {
        let ids = self.zrevrange_ids(&keys::groups(), limit).await?;

        let mut groups = Vec::with_capacity(ids.len());
        for id in ids {
            groups.push(self.group(Snowflake::new(id)).await?);
        }
        Ok(groups)
    }

    #[instrument(skip(self))]
    async fn add_group_member(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
    ) -> StoreResult<bool> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let added: i64 = conn
            .sadd(keys::group_members(group_id), user_id.into_inner())
            .await
            .map_err(rerr)?;
        Ok(added > 0)
    }

    #[instrument(skip(self))]
    async fn remove_group_member(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
    ) -> StoreResult<bool> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let removed: i64 = conn
            .srem(keys::group_members(group_id), user_id.into_inner())
            .await
            .map_err(rerr)?;
        Ok(removed > 0)
    }

    #[instrument(skip(self))]
    async fn adjust_group_member_count(
        &self,
        group_id: Snowflake,
        delta: i64,
    ) -> StoreResult<i64> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;

        let exists: bool = conn.exists(keys::group(group_id)).await.map_err(rerr)?;
        if !exists {
            return Err(DomainError::GroupNotFound(group_id.to_string()));
        }

        let count: i64 = floored_incr_script()
            .key(keys::group_counters(group_id))
            .arg(MEMBER_FIELD)
            .arg(delta)
            .invoke_async(&mut conn)
            .await
            .map_err(rerr)?;
        Ok(count)
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create_group_message(&self, message: &ChatGroupMessage) -> StoreResult<()> {
        self.pool
            .put_doc(&keys::group_message(message.id), message)
            .await
            .map_err(map_redis_error)?;

        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let id = message.id.into_inner();
        let _: () = conn
            .zadd(keys::group_messages(message.group_id), id, id)
            .await
            .map_err(rerr)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn group_messages(
        &self,
        group_id: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<ChatGroupMessage>> {
        let ids = self
            .zrange_ids(&keys::group_messages(group_id), limit)
            .await?;
        let doc_keys: Vec<String> = ids
            .iter()
            .map(|&id| keys::group_message(Snowflake::new(id)))
            .collect();
        self.pool.get_docs(&doc_keys).await.map_err(map_redis_error)
    }

    // ========================================================================
    // Friendships
    // ========================================================================

    #[instrument(skip(self, friendship), fields(friendship_id = %friendship.id))]
    async fn create_friendship(&self, friendship: &Friendship) -> StoreResult<()> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;

        // Pair key doubles as the uniqueness guard for the edge
        let pair_key = keys::friendship_pair(friendship.requester_id, friendship.addressee_id);
        let claimed: bool = conn
            .set_nx(&pair_key, friendship.id.into_inner())
            .await
            .map_err(rerr)?;
        if !claimed {
            return Err(DomainError::FriendshipExists(
                friendship.requester_id.to_string(),
                friendship.addressee_id.to_string(),
            ));
        }

        self.pool
            .put_doc(&keys::friendship(friendship.id), friendship)
            .await
            .map_err(map_redis_error)?;

        let id = friendship.id.into_inner();
        let _: () = conn
            .zadd(keys::friendships_by_user(friendship.requester_id), id, id)
            .await
            .map_err(rerr)?;
        let _: () = conn
            .zadd(keys::friendships_by_user(friendship.addressee_id), id, id)
            .await
            .map_err(rerr)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn friendship(&self, id: Snowflake) -> StoreResult<Friendship> {
        self.pool
            .get_doc(&keys::friendship(id))
            .await
            .map_err(map_redis_error)?
            .ok_or_else(|| DomainError::FriendshipNotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn friendship_between(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
    ) -> StoreResult<Option<Friendship>> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let id: Option<i64> = conn
            .get(keys::friendship_pair(user_a, user_b))
            .await
            .map_err(rerr)?;

        match id {
            Some(id) => self
                .pool
                .get_doc(&keys::friendship(Snowflake::new(id)))
                .await
                .map_err(map_redis_error),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn set_friendship_status(
        &self,
        id: Snowflake,
        status: FriendshipStatus,
    ) -> StoreResult<()> {
        let mut friendship = self.friendship(id).await?;
        friendship.status = status;
        friendship.updated_at = Utc::now();
        self.pool
            .put_doc(&keys::friendship(id), &friendship)
            .await
            .map_err(map_redis_error)
    }

    #[instrument(skip(self))]
    async fn friendships_of(
        &self,
        user_id: Snowflake,
        status: Option<FriendshipStatus>,
    ) -> StoreResult<Vec<Friendship>> {
        let ids = self
            .zrevrange_ids(&keys::friendships_by_user(user_id), -1)
            .await?;
        let doc_keys: Vec<String> = ids
            .iter()
            .map(|&id| keys::friendship(Snowflake::new(id)))
            .collect();
        let friendships: Vec<Friendship> = self
            .pool
            .get_docs(&doc_keys)
            .await
            .map_err(map_redis_error)?;

        Ok(match status {
            Some(status) => friendships
                .into_iter()
                .filter(|f| f.status == status)
                .collect(),
            None => friendships,
        })
    }

    #[instrument(skip(self))]
    async fn delete_friendship(&self, id: Snowflake) -> StoreResult<()> {
        let friendship = self.friendship(id).await?;

        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let raw = id.into_inner();
        let _: () = conn.del(keys::friendship(id)).await.map_err(rerr)?;
        let _: () = conn
            .del(keys::friendship_pair(friendship.requester_id, friendship.addressee_id))
            .await
            .map_err(rerr)?;
        let _: () = conn
            .zrem(keys::friendships_by_user(friendship.requester_id), raw)
            .await
            .map_err(rerr)?;
        let _: () = conn
            .zrem(keys::friendships_by_user(friendship.addressee_id), raw)
            .await
            .map_err(rerr)?;
        Ok(())
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    #[instrument(skip(self, notification), fields(notification_id = %notification.id))]
    async fn create_notification(&self, notification: &Notification) -> StoreResult<()> {
        self.pool
            .put_doc(&keys::notification(notification.id), notification)
            .await
            .map_err(map_redis_error)?;

        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let id = notification.id.into_inner();
        let _: () = conn
            .zadd(keys::notifications_by_user(notification.recipient_id), id, id)
            .await
            .map_err(rerr)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn notifications_for(
        &self,
        recipient_id: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<Notification>> {
        let ids = self
            .zrevrange_ids(&keys::notifications_by_user(recipient_id), limit)
            .await?;
        let doc_keys: Vec<String> = ids
            .iter()
            .map(|&id| keys::notification(Snowflake::new(id)))
            .collect();
        self.pool.get_docs(&doc_keys).await.map_err(map_redis_error)
    }

    #[instrument(skip(self))]
    async fn mark_notification_read(&self, id: Snowflake) -> StoreResult<()> {
        let mut notification: Notification = self
            .pool
            .get_doc(&keys::notification(id))
            .await
            .map_err(map_redis_error)?
            .ok_or_else(|| DomainError::NotificationNotFound(id.to_string()))?;

        notification.read = true;
        self.pool
            .put_doc(&keys::notification(id), &notification)
            .await
            .map_err(map_redis_error)
    }

    // ========================================================================
    // Hashtags
    // ========================================================================

    #[instrument(skip(self))]
    async fn bump_hashtag(&self, name: &str, at: DateTime<Utc>) -> StoreResult<i64> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let count: f64 = conn
            .zincr(keys::hashtag_usage(), name, 1i64)
            .await
            .map_err(rerr)?;
        let _: () = conn
            .hset(keys::hashtag_last_used(), name, at.timestamp_millis())
            .await
            .map_err(rerr)?;
        Ok(count as i64)
    }

    #[instrument(skip(self))]
    async fn trending_hashtags(&self, limit: i64) -> StoreResult<Vec<Hashtag>> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let stop = if limit > 0 { limit - 1 } else { -1 };
        let entries: Vec<(String, i64)> = conn
            .zrevrange_withscores(keys::hashtag_usage(), 0, stop as isize)
            .await
            .map_err(rerr)?;

        let mut tags = Vec::with_capacity(entries.len());
        for (name, use_count) in entries {
            let last_used: Option<i64> = conn
                .hget(keys::hashtag_last_used(), &name)
                .await
                .map_err(rerr)?;
            let last_used_at = last_used
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
                .unwrap_or_else(Utc::now);
            tags.push(Hashtag {
                name,
                use_count,
                last_used_at,
            });
        }
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DocSocialStore>();
    }
}
