//! Post, comment, and like entities

use crate::value_objects::Snowflake;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum post content length in characters
pub const MAX_POST_LENGTH: usize = 2000;

/// Maximum comment content length in characters
pub const MAX_COMMENT_LENGTH: usize = 500;

/// A social feed post.
///
/// Counter fields are denormalized and maintained atomically by the stores.
/// They never go below zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: Snowflake,
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

impl Post {
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        author_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            author_name: author_name.into(),
            author_avatar_url: None,
            content: content.into(),
            image_url: None,
            hashtags: Vec::new(),
            like_count: 0,
            comment_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_hashtags(mut self, tags: Vec<String>) -> Self {
        self.hashtags = tags;
        self
    }
}

/// A comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        id: Snowflake,
        post_id: Snowflake,
        author_id: Snowflake,
        author_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            post_id,
            author_id,
            author_name: author_name.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// A like on a post. One per (post, user) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Like {
    pub fn new(id: Snowflake, post_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            id,
            post_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}
