//! Direct message entities

use crate::value_objects::Snowflake;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum direct message length in characters
pub const MAX_MESSAGE_LENGTH: usize = 1000;

/// A direct message between two users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    pub sender_name: String,
    pub recipient_id: Snowflake,
    pub content: String,
    #[serde(default)]
    pub is_sticker: bool,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(
        id: Snowflake,
        sender_id: Snowflake,
        sender_name: impl Into<String>,
        recipient_id: Snowflake,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            sender_id,
            sender_name: sender_name.into(),
            recipient_id,
            content: content.into(),
            is_sticker: false,
            read: false,
            created_at: Utc::now(),
        }
    }

    /// Mark the message as a sticker.
    #[must_use]
    pub fn as_sticker(mut self) -> Self {
        self.is_sticker = true;
        self
    }

    /// The other participant relative to `user_id`.
    pub fn counterpart(&self, user_id: Snowflake) -> Snowflake {
        if self.sender_id == user_id {
            self.recipient_id
        } else {
            self.sender_id
        }
    }
}

/// One row in a user's conversation list: the latest message per peer
/// plus the count of unread messages from that peer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub peer_id: Snowflake,
    pub peer_name: String,
    pub last_message: String,
    pub last_message_at: DateTime<Utc>,
    pub unread_count: i64,
}
