//! Notification entity

use crate::value_objects::Snowflake;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of event a notification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewPost,
    Like,
    Comment,
    FriendRequest,
    FriendAccept,
    Message,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewPost => "new_post",
            Self::Like => "like",
            Self::Comment => "comment",
            Self::FriendRequest => "friend_request",
            Self::FriendAccept => "friend_accept",
            Self::Message => "message",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new_post" => Some(Self::NewPost),
            "like" => Some(Self::Like),
            "comment" => Some(Self::Comment),
            "friend_request" => Some(Self::FriendRequest),
            "friend_accept" => Some(Self::FriendAccept),
            "message" => Some(Self::Message),
            _ => None,
        }
    }
}

/// An in-app notification delivered to a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Snowflake,
    pub recipient_id: Snowflake,
    pub actor_id: Snowflake,
    pub actor_name: String,
    pub kind: NotificationKind,
    pub body: String,
    /// The post, message, or friendship the notification points at.
    pub subject_id: Option<Snowflake>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        id: Snowflake,
        recipient_id: Snowflake,
        actor_id: Snowflake,
        actor_name: impl Into<String>,
        kind: NotificationKind,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id,
            recipient_id,
            actor_id,
            actor_name: actor_name.into(),
            kind,
            body: body.into(),
            subject_id: None,
            read: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_subject(mut self, subject_id: Snowflake) -> Self {
        self.subject_id = Some(subject_id);
        self
    }
}
