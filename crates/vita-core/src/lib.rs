//! # vita-core
//!
//! Domain layer containing entities, value objects, domain errors, and the
//! store capability traits. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ActivityLog, AppSession, ChatGroup, ChatGroupMessage, ChatMessage, Comment,
    ConversationSummary, Friendship, FriendshipStatus, Hashtag, Like, MealLog, Notification,
    NotificationKind, Post, SleepLog, UserProfile, MAX_COMMENT_LENGTH, MAX_GROUP_NAME_LENGTH,
    MAX_MESSAGE_LENGTH, MAX_POST_LENGTH,
};
pub use error::DomainError;
pub use traits::{
    FileStore, FileStoreRef, HealthLogStore, HealthLogStoreRef, ProfileStore, ProfileStoreRef,
    SocialStore, SocialStoreRef, StoreResult,
};
pub use value_objects::{
    extract_hashtags, normalize_hashtag, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
