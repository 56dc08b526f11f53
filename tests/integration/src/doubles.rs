//! In-memory store doubles for exercising the gateway without Postgres
//! or Redis.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use vita_core::{
    ActivityLog, AppSession, ChatGroup, ChatGroupMessage, ChatMessage, Comment, DomainError,
    FileStore, Friendship, FriendshipStatus, Hashtag, HealthLogStore, Like, MealLog, Notification,
    Post, ProfileStore, SleepLog, Snowflake, SocialStore, StoreResult, UserProfile,
};

// ============================================================================
// Social store
// ============================================================================

#[derive(Default)]
struct SocialState {
    posts: HashMap<Snowflake, Post>,
    comments: HashMap<Snowflake, Comment>,
    likes: Vec<Like>,
    messages: Vec<ChatMessage>,
    friendships: HashMap<Snowflake, Friendship>,
    notifications: Vec<Notification>,
    hashtags: HashMap<String, Hashtag>,
    groups: HashMap<Snowflake, ChatGroup>,
    group_members: HashMap<Snowflake, HashSet<Snowflake>>,
    group_messages: Vec<ChatGroupMessage>,
}

/// In-memory social store with a call counter
pub struct MemorySocialStore {
    name: &'static str,
    state: Mutex<SocialState>,
    calls: AtomicUsize,
    fail_counters: AtomicBool,
}

impl MemorySocialStore {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(SocialState::default()),
            calls: AtomicUsize::new(0),
            fail_counters: AtomicBool::new(false),
        }
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    /// Make every counter adjustment report the store as unavailable
    pub fn set_counter_failures(&self, fail: bool) {
        self.fail_counters.store(fail, Ordering::SeqCst);
    }

    fn counter_fault(&self) -> Option<DomainError> {
        self.fail_counters.load(Ordering::SeqCst).then(|| {
            DomainError::StoreUnavailable(format!("{}: counter backend down", self.name))
        })
    }

    /// Total store operations invoked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn post_count(&self) -> usize {
        self.state.lock().posts.len()
    }

    pub fn like_rows(&self, post_id: Snowflake) -> usize {
        self.state
            .lock()
            .likes
            .iter()
            .filter(|l| l.post_id == post_id)
            .count()
    }

    pub fn message_count(&self) -> usize {
        self.state.lock().messages.len()
    }

    pub fn friendship_rows(&self) -> usize {
        self.state.lock().friendships.len()
    }

    pub fn hashtag_use_count(&self, name: &str) -> Option<i64> {
        self.state.lock().hashtags.get(name).map(|t| t.use_count)
    }

    pub fn hashtag_rows(&self) -> usize {
        self.state.lock().hashtags.len()
    }

    pub fn comment_rows(&self, post_id: Snowflake) -> usize {
        self.state
            .lock()
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .count()
    }

    pub fn notification_rows(&self, recipient_id: Snowflake) -> usize {
        self.state
            .lock()
            .notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .count()
    }

    pub fn group_member_rows(&self, group_id: Snowflake) -> usize {
        self.state
            .lock()
            .group_members
            .get(&group_id)
            .map_or(0, HashSet::len)
    }

    pub fn group_message_count(&self) -> usize {
        self.state.lock().group_messages.len()
    }
}

#[async_trait]
impl SocialStore for MemorySocialStore {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn create_post(&self, post: &Post) -> StoreResult<()> {
        self.tick();
        self.state.lock().posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn post(&self, id: Snowflake) -> StoreResult<Post> {
        self.tick();
        self.state
            .lock()
            .posts
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::PostNotFound(id.to_string()))
    }

    async fn recent_posts(&self, limit: i64) -> StoreResult<Vec<Post>> {
        self.tick();
        let state = self.state.lock();
        let mut posts: Vec<Post> = state.posts.values().cloned().collect();
        posts.sort_by(|a, b| b.id.cmp(&a.id));
        posts.truncate(limit as usize);
        Ok(posts)
    }

    async fn posts_by_author(&self, author_id: Snowflake, limit: i64) -> StoreResult<Vec<Post>> {
        self.tick();
        let state = self.state.lock();
        let mut posts: Vec<Post> = state
            .posts
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.id.cmp(&a.id));
        posts.truncate(limit as usize);
        Ok(posts)
    }

    async fn delete_post(&self, id: Snowflake) -> StoreResult<()> {
        self.tick();
        self.state
            .lock()
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::PostNotFound(id.to_string()))
    }

    async fn adjust_like_count(&self, post_id: Snowflake, delta: i64) -> StoreResult<i64> {
        self.tick();
        if let Some(err) = self.counter_fault() {
            return Err(err);
        }
        let mut state = self.state.lock();
        let post = state
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| DomainError::PostNotFound(post_id.to_string()))?;
        post.like_count = (post.like_count + delta).max(0);
        Ok(post.like_count)
    }

    async fn adjust_comment_count(&self, post_id: Snowflake, delta: i64) -> StoreResult<i64> {
        self.tick();
        if let Some(err) = self.counter_fault() {
            return Err(err);
        }
        let mut state = self.state.lock();
        let post = state
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| DomainError::PostNotFound(post_id.to_string()))?;
        post.comment_count = (post.comment_count + delta).max(0);
        Ok(post.comment_count)
    }

    async fn create_comment(&self, comment: &Comment) -> StoreResult<()> {
        self.tick();
        self.state.lock().comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn comment(&self, id: Snowflake) -> StoreResult<Comment> {
        self.tick();
        self.state
            .lock()
            .comments
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::CommentNotFound(id.to_string()))
    }

    async fn comments_for_post(&self, post_id: Snowflake) -> StoreResult<Vec<Comment>> {
        self.tick();
        let state = self.state.lock();
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(comments)
    }

    async fn delete_comment(&self, id: Snowflake) -> StoreResult<()> {
        self.tick();
        self.state
            .lock()
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::CommentNotFound(id.to_string()))
    }

    async fn like_exists(&self, post_id: Snowflake, user_id: Snowflake) -> StoreResult<bool> {
        self.tick();
        Ok(self
            .state
            .lock()
            .likes
            .iter()
            .any(|l| l.post_id == post_id && l.user_id == user_id))
    }

    async fn create_like(&self, like: &Like) -> StoreResult<()> {
        self.tick();
        let mut state = self.state.lock();
        if state
            .likes
            .iter()
            .any(|l| l.post_id == like.post_id && l.user_id == like.user_id)
        {
            return Err(DomainError::DuplicateLike(like.post_id.to_string()));
        }
        state.likes.push(like.clone());
        Ok(())
    }

    async fn delete_like(&self, post_id: Snowflake, user_id: Snowflake) -> StoreResult<bool> {
        self.tick();
        let mut state = self.state.lock();
        let before = state.likes.len();
        state
            .likes
            .retain(|l| !(l.post_id == post_id && l.user_id == user_id));
        Ok(state.likes.len() < before)
    }

    async fn create_message(&self, message: &ChatMessage) -> StoreResult<()> {
        self.tick();
        self.state.lock().messages.push(message.clone());
        Ok(())
    }

    async fn messages_between(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<ChatMessage>> {
        self.tick();
        let state = self.state.lock();
        let mut messages: Vec<ChatMessage> = state
            .messages
            .iter()
            .filter(|m| {
                (m.sender_id == user_a && m.recipient_id == user_b)
                    || (m.sender_id == user_b && m.recipient_id == user_a)
            })
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.id.cmp(&b.id));
        let len = messages.len();
        if len > limit as usize {
            messages.drain(..len - limit as usize);
        }
        Ok(messages)
    }

    async fn count_messages_from(
        &self,
        sender: Snowflake,
        recipient: Snowflake,
    ) -> StoreResult<i64> {
        self.tick();
        Ok(self
            .state
            .lock()
            .messages
            .iter()
            .filter(|m| m.sender_id == sender && m.recipient_id == recipient)
            .count() as i64)
    }

    async fn mark_messages_read(&self, user: Snowflake, peer: Snowflake) -> StoreResult<()> {
        self.tick();
        for message in self.state.lock().messages.iter_mut() {
            if message.recipient_id == user && message.sender_id == peer {
                message.read = true;
            }
        }
        Ok(())
    }

    async fn unread_count(&self, user: Snowflake) -> StoreResult<i64> {
        self.tick();
        Ok(self
            .state
            .lock()
            .messages
            .iter()
            .filter(|m| m.recipient_id == user && !m.read)
            .count() as i64)
    }

    async fn messages_involving(
        &self,
        user: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<ChatMessage>> {
        self.tick();
        let state = self.state.lock();
        let mut messages: Vec<ChatMessage> = state
            .messages
            .iter()
            .filter(|m| m.sender_id == user || m.recipient_id == user)
            .cloned()
            .collect();
        messages.sort_by(|a, b| b.id.cmp(&a.id));
        messages.truncate(limit as usize);
        Ok(messages)
    }

    async fn create_group(&self, group: &ChatGroup) -> StoreResult<()> {
        self.tick();
        self.state.lock().groups.insert(group.id, group.clone());
        Ok(())
    }

    async fn group(&self, id: Snowflake) -> StoreResult<ChatGroup> {
        self.tick();
        self.state
            .lock()
            .groups
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::GroupNotFound(id.to_string()))
    }

    async fn groups(&self, limit: i64) -> StoreResult<Vec<ChatGroup>> {
        self.tick();
        let state = self.state.lock();
        let mut groups: Vec<ChatGroup> = state.groups.values().cloned().collect();
        groups.sort_by(|a, b| b.id.cmp(&a.id));
        groups.truncate(limit as usize);
        Ok(groups)
    }

    async fn add_group_member(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
    ) -> StoreResult<bool> {
        self.tick();
        Ok(self
            .state
            .lock()
            .group_members
            .entry(group_id)
            .or_default()
            .insert(user_id))
    }

    async fn remove_group_member(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
    ) -> StoreResult<bool> {
        self.tick();
        Ok(self
            .state
            .lock()
            .group_members
            .get_mut(&group_id)
            .map_or(false, |members| members.remove(&user_id)))
    }

    async fn adjust_group_member_count(
        &self,
        group_id: Snowflake,
        delta: i64,
    ) -> StoreResult<i64> {
        self.tick();
        if let Some(err) = self.counter_fault() {
            return Err(err);
        }
        let mut state = self.state.lock();
        let group = state
            .groups
            .get_mut(&group_id)
            .ok_or_else(|| DomainError::GroupNotFound(group_id.to_string()))?;
        group.member_count = (group.member_count + delta).max(0);
        Ok(group.member_count)
    }

    async fn create_group_message(&self, message: &ChatGroupMessage) -> StoreResult<()> {
        self.tick();
        self.state.lock().group_messages.push(message.clone());
        Ok(())
    }

    async fn group_messages(
        &self,
        group_id: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<ChatGroupMessage>> {
        self.tick();
        let state = self.state.lock();
        let mut messages: Vec<ChatGroupMessage> = state
            .group_messages
            .iter()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.id.cmp(&b.id));
        messages.truncate(limit as usize);
        Ok(messages)
    }

    async fn create_friendship(&self, friendship: &Friendship) -> StoreResult<()> {
        self.tick();
        self.state
            .lock()
            .friendships
            .insert(friendship.id, friendship.clone());
        Ok(())
    }

    async fn friendship(&self, id: Snowflake) -> StoreResult<Friendship> {
        self.tick();
        self.state
            .lock()
            .friendships
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::FriendshipNotFound(id.to_string()))
    }

    async fn friendship_between(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
    ) -> StoreResult<Option<Friendship>> {
        self.tick();
        Ok(self
            .state
            .lock()
            .friendships
            .values()
            .find(|f| f.involves(user_a) && f.involves(user_b))
            .cloned())
    }

    async fn set_friendship_status(
        &self,
        id: Snowflake,
        status: FriendshipStatus,
    ) -> StoreResult<()> {
        self.tick();
        let mut state = self.state.lock();
        let friendship = state
            .friendships
            .get_mut(&id)
            .ok_or_else(|| DomainError::FriendshipNotFound(id.to_string()))?;
        friendship.status = status;
        friendship.updated_at = Utc::now();
        Ok(())
    }

    async fn friendships_of(
        &self,
        user_id: Snowflake,
        status: Option<FriendshipStatus>,
    ) -> StoreResult<Vec<Friendship>> {
        self.tick();
        Ok(self
            .state
            .lock()
            .friendships
            .values()
            .filter(|f| f.involves(user_id))
            .filter(|f| status.map_or(true, |s| f.status == s))
            .cloned()
            .collect())
    }

    async fn delete_friendship(&self, id: Snowflake) -> StoreResult<()> {
        self.tick();
        self.state
            .lock()
            .friendships
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::FriendshipNotFound(id.to_string()))
    }

    async fn create_notification(&self, notification: &Notification) -> StoreResult<()> {
        self.tick();
        self.state.lock().notifications.push(notification.clone());
        Ok(())
    }

    async fn notifications_for(
        &self,
        recipient_id: Snowflake,
        limit: i64,
    ) -> StoreResult<Vec<Notification>> {
        self.tick();
        let state = self.state.lock();
        let mut notifications: Vec<Notification> = state
            .notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.id.cmp(&a.id));
        notifications.truncate(limit as usize);
        Ok(notifications)
    }

    async fn mark_notification_read(&self, id: Snowflake) -> StoreResult<()> {
        self.tick();
        let mut state = self.state.lock();
        let notification = state
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| DomainError::NotificationNotFound(id.to_string()))?;
        notification.read = true;
        Ok(())
    }

    async fn bump_hashtag(&self, name: &str, at: DateTime<Utc>) -> StoreResult<i64> {
        self.tick();
        let mut state = self.state.lock();
        let tag = state
            .hashtags
            .entry(name.to_string())
            .and_modify(|t| {
                t.use_count += 1;
                t.last_used_at = at;
            })
            .or_insert_with(|| Hashtag::new(name));
        Ok(tag.use_count)
    }

    async fn trending_hashtags(&self, limit: i64) -> StoreResult<Vec<Hashtag>> {
        self.tick();
        let state = self.state.lock();
        let mut tags: Vec<Hashtag> = state.hashtags.values().cloned().collect();
        tags.sort_by(|a, b| b.use_count.cmp(&a.use_count));
        tags.truncate(limit as usize);
        Ok(tags)
    }
}

// ============================================================================
// Failing social store
// ============================================================================

/// Which recoverable fault the failing store reports
#[derive(Debug, Clone, Copy)]
pub enum FailureMode {
    MissingRelation,
    Unavailable,
}

/// Social store that fails every operation with a recoverable error
pub struct FailingSocialStore {
    name: &'static str,
    mode: FailureMode,
    calls: AtomicUsize,
}

impl FailingSocialStore {
    pub fn new(name: &'static str, mode: FailureMode) -> Self {
        Self {
            name,
            mode,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn err(&self) -> DomainError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            FailureMode::MissingRelation => {
                DomainError::MissingRelation(format!("{}: relation missing", self.name))
            }
            FailureMode::Unavailable => {
                DomainError::StoreUnavailable(format!("{}: connection refused", self.name))
            }
        }
    }
}

#[async_trait]
impl SocialStore for FailingSocialStore {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn create_post(&self, _post: &Post) -> StoreResult<()> {
        Err(self.err())
    }

    async fn post(&self, _id: Snowflake) -> StoreResult<Post> {
        Err(self.err())
    }

    async fn recent_posts(&self, _limit: i64) -> StoreResult<Vec<Post>> {
        Err(self.err())
    }

    async fn posts_by_author(&self, _author_id: Snowflake, _limit: i64) -> StoreResult<Vec<Post>> {
        Err(self.err())
    }

    async fn delete_post(&self, _id: Snowflake) -> StoreResult<()> {
        Err(self.err())
    }

    async fn adjust_like_count(&self, _post_id: Snowflake, _delta: i64) -> StoreResult<i64> {
        Err(self.err())
    }

    async fn adjust_comment_count(&self, _post_id: Snowflake, _delta: i64) -> StoreResult<i64> {
        Err(self.err())
    }

    async fn create_comment(&self, _comment: &Comment) -> StoreResult<()> {
        Err(self.err())
    }

    async fn comment(&self, _id: Snowflake) -> StoreResult<Comment> {
        Err(self.err())
    }

    async fn comments_for_post(&self, _post_id: Snowflake) -> StoreResult<Vec<Comment>> {
        Err(self.err())
    }

    async fn delete_comment(&self, _id: Snowflake) -> StoreResult<()> {
        Err(self.err())
    }

    async fn like_exists(&self, _post_id: Snowflake, _user_id: Snowflake) -> StoreResult<bool> {
        Err(self.err())
    }

    async fn create_like(&self, _like: &Like) -> StoreResult<()> {
        Err(self.err())
    }

    async fn delete_like(&self, _post_id: Snowflake, _user_id: Snowflake) -> StoreResult<bool> {
        Err(self.err())
    }

    async fn create_message(&self, _message: &ChatMessage) -> StoreResult<()> {
        Err(self.err())
    }

    async fn messages_between(
        &self,
        _user_a: Snowflake,
        _user_b: Snowflake,
        _limit: i64,
    ) -> StoreResult<Vec<ChatMessage>> {
        Err(self.err())
    }

    async fn count_messages_from(
        &self,
        _sender: Snowflake,
        _recipient: Snowflake,
    ) -> StoreResult<i64> {
        Err(self.err())
    }

    async fn mark_messages_read(&self, _user: Snowflake, _peer: Snowflake) -> StoreResult<()> {
        Err(self.err())
    }

    async fn unread_count(&self, _user: Snowflake) -> StoreResult<i64> {
        Err(self.err())
    }

    async fn messages_involving(
        &self,
        _user: Snowflake,
        _limit: i64,
    ) -> StoreResult<Vec<ChatMessage>> {
        Err(self.err())
    }

    async fn create_group(&self, _group: &ChatGroup) -> StoreResult<()> {
        Err(self.err())
    }

    async fn group(&self, _id: Snowflake) -> StoreResult<ChatGroup> {
        Err(self.err())
    }

    async fn groups(&self, _limit: i64) -> StoreResult<Vec<ChatGroup>> {
        Err(self.err())
    }

    async fn add_group_member(
        &self,
        _group_id: Snowflake,
        _user_id: Snowflake,
    ) -> StoreResult<bool> {
        Err(self.err())
    }

    async fn remove_group_member(
        &self,
        _group_id: Snowflake,
        _user_id: Snowflake,
    ) -> StoreResult<bool> {
        Err(self.err())
    }

    async fn adjust_group_member_count(
        &self,
        _group_id: Snowflake,
        _delta: i64,
    ) -> StoreResult<i64> {
        Err(self.err())
    }

    async fn create_group_message(&self, _message: &ChatGroupMessage) -> StoreResult<()> {
        Err(self.err())
    }

    async fn group_messages(
        &self,
        _group_id: Snowflake,
        _limit: i64,
    ) -> StoreResult<Vec<ChatGroupMessage>> {
        Err(self.err())
    }

    async fn create_friendship(&self, _friendship: &Friendship) -> StoreResult<()> {
        Err(self.err())
    }

    async fn friendship(&self, _id: Snowflake) -> StoreResult<Friendship> {
        Err(self.err())
    }

    async fn friendship_between(
        &self,
        _user_a: Snowflake,
        _user_b: Snowflake,
    ) -> StoreResult<Option<Friendship>> {
        Err(self.err())
    }

    async fn set_friendship_status(
        &self,
        _id: Snowflake,
        _status: FriendshipStatus,
    ) -> StoreResult<()> {
        Err(self.err())
    }

    async fn friendships_of(
        &self,
        _user_id: Snowflake,
        _status: Option<FriendshipStatus>,
    ) -> StoreResult<Vec<Friendship>> {
        Err(self.err())
    }

    async fn delete_friendship(&self, _id: Snowflake) -> StoreResult<()> {
        Err(self.err())
    }

    async fn create_notification(&self, _notification: &Notification) -> StoreResult<()> {
        Err(self.err())
    }

    async fn notifications_for(
        &self,
        _recipient_id: Snowflake,
        _limit: i64,
    ) -> StoreResult<Vec<Notification>> {
        Err(self.err())
    }

    async fn mark_notification_read(&self, _id: Snowflake) -> StoreResult<()> {
        Err(self.err())
    }

    async fn bump_hashtag(&self, _name: &str, _at: DateTime<Utc>) -> StoreResult<i64> {
        Err(self.err())
    }

    async fn trending_hashtags(&self, _limit: i64) -> StoreResult<Vec<Hashtag>> {
        Err(self.err())
    }
}

// ============================================================================
// Profile store
// ============================================================================

/// In-memory profile store
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<Snowflake, (UserProfile, String)>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn create_profile(&self, profile: &UserProfile, password_hash: &str) -> StoreResult<()> {
        let mut profiles = self.profiles.lock();
        if profiles
            .values()
            .any(|(p, _)| p.email.eq_ignore_ascii_case(&profile.email))
        {
            return Err(DomainError::EmailAlreadyExists(profile.email.clone()));
        }
        profiles.insert(profile.id, (profile.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn profile(&self, id: Snowflake) -> StoreResult<UserProfile> {
        self.profiles
            .lock()
            .get(&id)
            .map(|(p, _)| p.clone())
            .ok_or_else(|| DomainError::ProfileNotFound(id.to_string()))
    }

    async fn profile_by_email(&self, email: &str) -> StoreResult<UserProfile> {
        self.profiles
            .lock()
            .values()
            .find(|(p, _)| p.email.eq_ignore_ascii_case(email))
            .map(|(p, _)| p.clone())
            .ok_or_else(|| DomainError::ProfileNotFound(email.to_string()))
    }

    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        Ok(self
            .profiles
            .lock()
            .values()
            .any(|(p, _)| p.email.eq_ignore_ascii_case(email)))
    }

    async fn password_hash(&self, id: Snowflake) -> StoreResult<String> {
        self.profiles
            .lock()
            .get(&id)
            .map(|(_, h)| h.clone())
            .ok_or_else(|| DomainError::ProfileNotFound(id.to_string()))
    }

    async fn update_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        let mut profiles = self.profiles.lock();
        let entry = profiles
            .get_mut(&profile.id)
            .ok_or_else(|| DomainError::ProfileNotFound(profile.id.to_string()))?;
        entry.0 = profile.clone();
        Ok(())
    }

    async fn update_password_hash(&self, id: Snowflake, password_hash: &str) -> StoreResult<()> {
        let mut profiles = self.profiles.lock();
        let entry = profiles
            .get_mut(&id)
            .ok_or_else(|| DomainError::ProfileNotFound(id.to_string()))?;
        entry.1 = password_hash.to_string();
        Ok(())
    }

    async fn all_profile_ids(&self) -> StoreResult<Vec<Snowflake>> {
        let mut ids: Vec<Snowflake> = self.profiles.lock().keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}

// ============================================================================
// Health log store
// ============================================================================

/// In-memory health log store
#[derive(Default)]
pub struct MemoryHealthLogStore {
    meals: Mutex<Vec<MealLog>>,
    sleep: Mutex<Vec<SleepLog>>,
    activity: Mutex<Vec<ActivityLog>>,
    app_sessions: Mutex<Vec<AppSession>>,
}

impl MemoryHealthLogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HealthLogStore for MemoryHealthLogStore {
    async fn insert_meal(&self, log: &MealLog) -> StoreResult<()> {
        self.meals.lock().push(log.clone());
        Ok(())
    }

    async fn meals_since(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<MealLog>> {
        Ok(self
            .meals
            .lock()
            .iter()
            .filter(|m| m.user_id == user_id && m.logged_at >= since)
            .cloned()
            .collect())
    }

    async fn insert_sleep(&self, log: &SleepLog) -> StoreResult<()> {
        self.sleep.lock().push(log.clone());
        Ok(())
    }

    async fn sleep_since(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<SleepLog>> {
        Ok(self
            .sleep
            .lock()
            .iter()
            .filter(|s| s.user_id == user_id && s.ended_at >= since)
            .cloned()
            .collect())
    }

    async fn insert_activity(&self, log: &ActivityLog) -> StoreResult<()> {
        self.activity.lock().push(log.clone());
        Ok(())
    }

    async fn activity_since(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<ActivityLog>> {
        Ok(self
            .activity
            .lock()
            .iter()
            .filter(|a| a.user_id == user_id && a.logged_at >= since)
            .cloned()
            .collect())
    }

    async fn insert_app_session(&self, session: &AppSession) -> StoreResult<()> {
        self.app_sessions.lock().push(session.clone());
        Ok(())
    }

    async fn app_sessions_since(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<AppSession>> {
        Ok(self
            .app_sessions
            .lock()
            .iter()
            .filter(|s| s.user_id == user_id && s.started_at >= since)
            .cloned()
            .collect())
    }
}

// ============================================================================
// File store
// ============================================================================

/// In-memory file store recording stored paths
#[derive(Default)]
pub struct MemoryFileStore {
    stored: Mutex<Vec<String>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored_paths(&self) -> Vec<String> {
        self.stored.lock().clone()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    fn name(&self) -> &'static str {
        "memory-files"
    }

    async fn store(&self, path: &str, _bytes: &[u8]) -> StoreResult<String> {
        self.stored.lock().push(path.to_string());
        Ok(format!("memory://{path}"))
    }

    async fn remove(&self, path: &str) -> StoreResult<()> {
        self.stored.lock().retain(|p| p != path);
        Ok(())
    }
}

/// File store that refuses every operation with a recoverable error
#[derive(Default)]
pub struct FailingFileStore {
    calls: AtomicUsize,
}

impl FailingFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn err(&self) -> DomainError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        DomainError::StoreUnavailable("broken-files: bucket unreachable".to_string())
    }
}

#[async_trait]
impl FileStore for FailingFileStore {
    fn name(&self) -> &'static str {
        "broken-files"
    }

    async fn store(&self, _path: &str, _bytes: &[u8]) -> StoreResult<String> {
        Err(self.err())
    }

    async fn remove(&self, _path: &str) -> StoreResult<()> {
        Err(self.err())
    }
}
