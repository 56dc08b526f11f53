//! Social database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub hashtags: Vec<String>,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Database model for the likes table
#[derive(Debug, Clone, FromRow)]
pub struct LikeModel {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Database model for the direct_messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub sender_id: i64,
    pub sender_name: String,
    pub recipient_id: i64,
    pub content: String,
    pub is_sticker: bool,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Database model for the chat_groups table
#[derive(Debug, Clone, FromRow)]
pub struct GroupModel {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub member_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Database model for the chat_group_messages table
#[derive(Debug, Clone, FromRow)]
pub struct GroupMessageModel {
    pub id: i64,
    pub group_id: i64,
    pub sender_id: i64,
    pub sender_name: String,
    pub content: String,
    pub is_sticker: bool,
    pub created_at: DateTime<Utc>,
}

/// Database model for the friendships table
#[derive(Debug, Clone, FromRow)]
pub struct FriendshipModel {
    pub id: i64,
    pub requester_id: i64,
    pub addressee_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub recipient_id: i64,
    pub actor_id: i64,
    pub actor_name: String,
    pub kind: String,
    pub body: String,
    pub subject_id: Option<i64>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Database model for the hashtags table
#[derive(Debug, Clone, FromRow)]
pub struct HashtagModel {
    pub name: String,
    pub use_count: i64,
    pub last_used_at: DateTime<Utc>,
}
