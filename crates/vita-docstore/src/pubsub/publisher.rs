//! Redis Pub/Sub publisher.
//!
//! Fans social events out to per-user channels and the global feed channel.
//! Publishing is a best-effort side effect: callers log failures but never
//! fail the originating write.

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::EventChannel;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use vita_core::Snowflake;

/// Event wrapper for Pub/Sub messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialEvent {
    /// Event type name (e.g., "POST_CREATE", "NOTIFICATION_CREATE")
    pub event_type: String,
    /// Event payload
    pub data: serde_json::Value,
}

impl SocialEvent {
    /// Create a new event
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct EventPublisher {
    pool: RedisPool,
}

impl EventPublisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel, returning the receiver count
    pub async fn publish(&self, channel: &EventChannel, event: &SocialEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            channel = %channel_name,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }

    /// Publish a new post to the global feed channel
    pub async fn publish_post_created(&self, post_data: serde_json::Value) -> RedisResult<u32> {
        let event = SocialEvent::new("POST_CREATE", post_data);
        self.publish(&EventChannel::Feed, &event).await
    }

    /// Publish a direct message to the recipient's channel
    pub async fn publish_message_created(
        &self,
        recipient_id: Snowflake,
        message_data: serde_json::Value,
    ) -> RedisResult<u32> {
        let event = SocialEvent::new("MESSAGE_CREATE", message_data);
        self.publish(&EventChannel::user(recipient_id), &event).await
    }

    /// Publish a group chat message to the group's channel
    pub async fn publish_group_message_created(
        &self,
        group_id: Snowflake,
        message_data: serde_json::Value,
    ) -> RedisResult<u32> {
        let event = SocialEvent::new("GROUP_MESSAGE_CREATE", message_data);
        self.publish(&EventChannel::group(group_id), &event).await
    }

    /// Publish a notification to the recipient's channel
    pub async fn publish_notification_created(
        &self,
        recipient_id: Snowflake,
        notification_data: serde_json::Value,
    ) -> RedisResult<u32> {
        let event = SocialEvent::new("NOTIFICATION_CREATE", notification_data);
        self.publish(&EventChannel::user(recipient_id), &event).await
    }
}
