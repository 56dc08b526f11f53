//! Store capability traits.
//!
//! Every persistence backend (relational or document) implements the same
//! [`SocialStore`] interface, so the gateway can run a request against an
//! ordered list of backends and fall through on recoverable faults without
//! knowing which technology sits behind each one.

use crate::entities::{
    ActivityLog, AppSession, ChatGroup, ChatGroupMessage, ChatMessage, Comment, Friendship,
    FriendshipStatus, Hashtag, Like, MealLog, Notification, Post, SleepLog, UserProfile,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Result type used by all store operations
pub type StoreResult<T> = Result<T, DomainError>;

/// Shared reference to a social store backend
pub type SocialStoreRef = Arc<dyn SocialStore>;

/// Shared reference to a health log store backend
pub type HealthLogStoreRef = Arc<dyn HealthLogStore>;

/// Shared reference to a profile store backend
pub type ProfileStoreRef = Arc<dyn ProfileStore>;

/// Shared reference to a file store backend
pub type FileStoreRef = Arc<dyn FileStore>;

/// Social data backend: posts, comments, likes, messages, friendships,
/// notifications, and hashtag statistics.
#[async_trait]
pub trait SocialStore: Send + Sync {
    /// Short backend name used in logs and error reports.
    fn name(&self) -> &'static str;

    // ========================================================================
    // Posts
    // ========================================================================

    async fn create_post(&self, post: &Post) -> StoreResult<()>;

    async fn post(&self, id: Snowflake) -> StoreResult<Post>;

    /// Most recent posts across all authors, newest first.
    async fn recent_posts(&self, limit: i64) -> StoreResult<Vec<Post>>;

    async fn posts_by_author(&self, author_id: Snowflake, limit: i64) -> StoreResult<Vec<Post>>;

    async fn delete_post(&self, id: Snowflake) -> StoreResult<()>;

    /// Atomically add `delta` to the like counter, flooring at zero.
    /// Returns the new counter value.
    async fn adjust_like_count(&self, post_id: Snowflake, delta: i64) -> StoreResult<i64>;

    /// Atomically add `delta` to the comment counter, flooring at zero.
    /// Returns the new counter value.
    async fn adjust_comment_count(&self, post_id: Snowflake, delta: i64) -> StoreResult<i64>;

    // ========================================================================
    // Comments
    // ========================================================================

    async fn create_comment(&self, comment: &Comment) -> StoreResult<()>;

    async fn comment(&self, id: Snowflake) -> StoreResult<Comment>;

    /// Comments for a post, oldest first.
    async fn comments_for_post(&self, post_id: Snowflake) -> StoreResult<Vec<Comment>>;

    async fn delete_comment(&self, id: Snowflake) -> StoreResult<()>;

    // ========================================================================
    // Likes
    // ========================================================================

    async fn like_exists(&self, post_id: Snowflake, user_id: Snowflake) -> StoreResult<bool>;

    async fn create_like(&self, like: &Like) -> StoreResult<()>;

    /// Remove a like if present. Returns whether a like was removed.
    async fn delete_like(&self, post_id: Snowflake, user_id: Snowflake) -> StoreResult<bool>;

    // ========================================================================
    // Direct messages
    // ========================================================================

    async fn create_message(&self, message: &ChatMessage) -> StoreResult<()>;

    /// Messages between two users in either direction, oldest first.
    async fn messages_between(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<ChatMessage>>;

    /// Number of messages `sender` has sent to `recipient`.
    async fn count_messages_from(
        &self,
        sender: Snowflake,
        recipient: Snowflake,
    ) -> StoreResult<i64>;

    /// Mark every message from `peer` to `user` as read.
    async fn mark_messages_read(&self, user: Snowflake, peer: Snowflake) -> StoreResult<()>;

    /// Total unread messages addressed to `user`.
    async fn unread_count(&self, user: Snowflake) -> StoreResult<i64>;

    /// All messages the user sent or received, newest first.
    async fn messages_involving(
        &self,
        user: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<ChatMessage>>;

    // ========================================================================
    // Group channels
    // ========================================================================

    async fn create_group(&self, group: &ChatGroup) -> StoreResult<()>;

    async fn group(&self, id: Snowflake) -> StoreResult<ChatGroup>;

    /// All group channels, newest first.
    async fn groups(&self, limit: i64) -> StoreResult<Vec<ChatGroup>>;

    /// Add `user_id` to the group. Returns whether a membership was created
    /// (false when the user was already a member).
    async fn add_group_member(&self, group_id: Snowflake, user_id: Snowflake)
        -> StoreResult<bool>;

    /// Remove `user_id` from the group. Returns whether a membership existed.
    async fn remove_group_member(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
    ) -> StoreResult<bool>;

    /// Atomically add `delta` to the member counter, flooring at zero.
    /// Returns the new counter value.
    async fn adjust_group_member_count(
        &self,
        group_id: Snowflake,
        delta: i64,
    ) -> StoreResult<i64>;

    async fn create_group_message(&self, message: &ChatGroupMessage) -> StoreResult<()>;

    /// Messages in a group, oldest first.
    async fn group_messages(
        &self,
        group_id: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<ChatGroupMessage>>;

    // ========================================================================
    // Friendships
    // ========================================================================

    async fn create_friendship(&self, friendship: &Friendship) -> StoreResult<()>;

    async fn friendship(&self, id: Snowflake) -> StoreResult<Friendship>;

    /// The edge between two users in either direction, if any.
    async fn friendship_between(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
    ) -> StoreResult<Option<Friendship>>;

    async fn set_friendship_status(
        &self,
        id: Snowflake,
        status: FriendshipStatus,
    ) -> StoreResult<()>;

    /// All edges involving the user, optionally filtered by status.
    async fn friendships_of(
        &self,
        user_id: Snowflake,
        status: Option<FriendshipStatus>,
    ) -> StoreResult<Vec<Friendship>>;

    async fn delete_friendship(&self, id: Snowflake) -> StoreResult<()>;

    // ========================================================================
    // Notifications
    // ========================================================================

    async fn create_notification(&self, notification: &Notification) -> StoreResult<()>;

    /// Notifications for a user, newest first.
    async fn notifications_for(
        &self,
        recipient_id: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<Notification>>;

    async fn mark_notification_read(&self, id: Snowflake) -> StoreResult<()>;

    // ========================================================================
    // Hashtags
    // ========================================================================

    /// Increment usage of a hashtag, creating it on first use.
    /// Returns the new use count.
    async fn bump_hashtag(&self, name: &str, at: DateTime<Utc>) -> StoreResult<i64>;

    /// Most-used hashtags, highest use count first.
    async fn trending_hashtags(&self, limit: i64) -> StoreResult<Vec<Hashtag>>;
}

/// Health log backend: meals, sleep, activity, and app sessions.
#[async_trait]
pub trait HealthLogStore: Send + Sync {
    async fn insert_meal(&self, log: &MealLog) -> StoreResult<()>;

    async fn meals_since(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<MealLog>>;

    async fn insert_sleep(&self, log: &SleepLog) -> StoreResult<()>;

    async fn sleep_since(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<SleepLog>>;

    async fn insert_activity(&self, log: &ActivityLog) -> StoreResult<()>;

    async fn activity_since(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<ActivityLog>>;

    async fn insert_app_session(&self, session: &AppSession) -> StoreResult<()>;

    async fn app_sessions_since(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<AppSession>>;
}

/// User account and credential backend.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn create_profile(&self, profile: &UserProfile, password_hash: &str) -> StoreResult<()>;

    async fn profile(&self, id: Snowflake) -> StoreResult<UserProfile>;

    async fn profile_by_email(&self, email: &str) -> StoreResult<UserProfile>;

    async fn email_exists(&self, email: &str) -> StoreResult<bool>;

    async fn password_hash(&self, id: Snowflake) -> StoreResult<String>;

    async fn update_profile(&self, profile: &UserProfile) -> StoreResult<()>;

    async fn update_password_hash(&self, id: Snowflake, password_hash: &str) -> StoreResult<()>;

    /// IDs of every registered account, used for broadcast fan-out.
    async fn all_profile_ids(&self) -> StoreResult<Vec<Snowflake>>;
}

/// Binary asset backend for post images and avatars.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Short backend name used in logs and error reports.
    fn name(&self) -> &'static str;

    /// Persist the bytes under `path` and return a public URL.
    async fn store(&self, path: &str, bytes: &[u8]) -> StoreResult<String>;

    /// Best-effort removal of a previously stored asset.
    async fn remove(&self, path: &str) -> StoreResult<()>;
}
