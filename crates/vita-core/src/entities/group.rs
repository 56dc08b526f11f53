//! Group chat channel entities

use crate::value_objects::Snowflake;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum group channel name length in characters
pub const MAX_GROUP_NAME_LENGTH: usize = 100;

/// A group chat channel any user can subscribe to.
///
/// `member_count` is a denormalized counter adjusted through the stores'
/// atomic `adjust_group_member_count` operation, floored at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatGroup {
    pub id: Snowflake,
    pub name: String,
    pub owner_id: Snowflake,
    pub member_count: i64,
    pub created_at: DateTime<Utc>,
}

impl ChatGroup {
    pub fn new(id: Snowflake, owner_id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            owner_id,
            member_count: 0,
            created_at: Utc::now(),
        }
    }
}

/// A message posted into a group channel.
///
/// Unlike direct messages, group messages carry no per-recipient read flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatGroupMessage {
    pub id: Snowflake,
    pub group_id: Snowflake,
    pub sender_id: Snowflake,
    pub sender_name: String,
    pub content: String,
    #[serde(default)]
    pub is_sticker: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatGroupMessage {
    pub fn new(
        id: Snowflake,
        group_id: Snowflake,
        sender_id: Snowflake,
        sender_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            group_id,
            sender_id,
            sender_name: sender_name.into(),
            content: content.into(),
            is_sticker: false,
            created_at: Utc::now(),
        }
    }

    /// Mark the message as a sticker.
    #[must_use]
    pub fn as_sticker(mut self) -> Self {
        self.is_sticker = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_groups_start_empty() {
        let group = ChatGroup::new(Snowflake::new(1), Snowflake::new(10), "runners");
        assert_eq!(group.member_count, 0);
    }

    #[test]
    fn sticker_flag_defaults_off() {
        let msg = ChatGroupMessage::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(10),
            "alice",
            "hello",
        );
        assert!(!msg.is_sticker);
        assert!(msg.as_sticker().is_sticker);
    }
}
