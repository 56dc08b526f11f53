//! Pub/Sub channel naming

use vita_core::Snowflake;

/// A named Pub/Sub channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventChannel {
    /// Per-user channel for notifications and messages
    User(Snowflake),
    /// Per-group channel for group chat messages
    Group(Snowflake),
    /// Global feed channel for new posts
    Feed,
}

impl EventChannel {
    /// Per-user channel
    #[must_use]
    pub fn user(id: Snowflake) -> Self {
        Self::User(id)
    }

    /// Per-group channel
    #[must_use]
    pub fn group(id: Snowflake) -> Self {
        Self::Group(id)
    }

    /// Channel name on the wire
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::User(id) => format!("events:user:{id}"),
            Self::Group(id) => format!("events:group:{id}"),
            Self::Feed => "events:feed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        assert_eq!(EventChannel::user(Snowflake::new(42)).name(), "events:user:42");
        assert_eq!(EventChannel::group(Snowflake::new(7)).name(), "events:group:7");
        assert_eq!(EventChannel::Feed.name(), "events:feed");
    }
}
