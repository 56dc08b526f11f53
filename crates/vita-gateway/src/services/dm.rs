//! Direct message service
//!
//! Non-friends may exchange a limited number of messages (two by default);
//! past the cap the sender must be friends with the recipient. The cap is
//! counted per direction, so both sides can open a conversation.

use std::collections::HashMap;

use tracing::{info, instrument, warn};
use validator::Validate;
use vita_core::{
    ChatMessage, ConversationSummary, DomainError, Friendship, Notification, NotificationKind,
    Snowflake, UserProfile, MAX_MESSAGE_LENGTH,
};

use crate::dto::SendMessageRequest;

use super::context::GatewayContext;
use super::error::{GatewayError, GatewayResult};
use super::notification::record_notification;
use super::resolve::{resolve_social, resolve_social_or_default};

/// How many messages to scan when building the conversation list
const CONVERSATION_SCAN_LIMIT: i64 = 500;

pub struct DmService<'a> {
    ctx: &'a GatewayContext,
}

impl<'a> DmService<'a> {
    pub fn new(ctx: &'a GatewayContext) -> Self {
        Self { ctx }
    }

    /// Send a direct message.
    #[instrument(skip(self, sender, request), fields(sender_id = %sender.id))]
    pub async fn send_message(
        &self,
        sender: &UserProfile,
        recipient_id: Snowflake,
        request: SendMessageRequest,
    ) -> GatewayResult<ChatMessage> {
        request
            .validate()
            .map_err(|e| GatewayError::validation(e.to_string()))?;

        let content = request.content.trim();
        if content.is_empty() {
            return Err(GatewayError::validation("Message cannot be empty"));
        }
        let length = content.chars().count();
        if length > MAX_MESSAGE_LENGTH {
            return Err(GatewayError::Domain(DomainError::ContentTooLong {
                length,
                max: MAX_MESSAGE_LENGTH,
            }));
        }
        if recipient_id == sender.id {
            return Err(GatewayError::validation("Cannot message yourself"));
        }

        // Recipient must be a real account.
        self.ctx.profile_store().profile(recipient_id).await?;

        let sender_id = sender.id;
        let friendship =
            resolve_social(self.ctx.social_stores(), "friendship_between", move |s| {
                Box::pin(async move { s.friendship_between(sender_id, recipient_id).await })
            })
            .await?;
        let had_edge = friendship.is_some();
        let friends = friendship.is_some_and(|f| f.is_accepted());

        if !friends {
            let sent = resolve_social(self.ctx.social_stores(), "count_messages_from", move |s| {
                Box::pin(async move { s.count_messages_from(sender_id, recipient_id).await })
            })
            .await?;

            let cap = self.ctx.social_config().non_friend_message_cap;
            if sent >= cap {
                return Err(GatewayError::MessageLimitReached { cap });
            }
        }

        let mut message = ChatMessage::new(
            self.ctx.generate_id(),
            sender.id,
            sender.display_name.clone(),
            recipient_id,
            content,
        );
        if request.is_sticker {
            message = message.as_sticker();
        }

        resolve_social(self.ctx.social_stores(), "create_message", {
            let message = message.clone();
            move |s| {
                let message = message.clone();
                Box::pin(async move { s.create_message(&message).await })
            }
        })
        .await?;

        // Opening a conversation with a stranger starts a pending friendship.
        if !had_edge {
            let edge = Friendship::new(self.ctx.generate_id(), sender.id, recipient_id);
            let created = resolve_social(self.ctx.social_stores(), "create_friendship", {
                let edge = edge.clone();
                move |s| {
                    let edge = edge.clone();
                    Box::pin(async move { s.create_friendship(&edge).await })
                }
            })
            .await;
            if let Err(e) = created {
                warn!(error = %e, "failed to auto-create pending friendship");
            }
        }

        // Best-effort fan-out to the recipient.
        if let Some(publisher) = self.ctx.publisher() {
            if let Ok(data) = serde_json::to_value(&message) {
                publisher
                    .publish_message_created(recipient_id, data)
                    .await
                    .ok();
            }
        }
        let notification = Notification::new(
            self.ctx.generate_id(),
            recipient_id,
            sender.id,
            sender.display_name.clone(),
            NotificationKind::Message,
            format!("{} sent you a message", sender.display_name),
        )
        .with_subject(message.id);
        record_notification(self.ctx, notification).await;

        info!(message_id = %message.id, recipient = %recipient_id, "message sent");
        Ok(message)
    }

    /// Messages between the caller and a peer, oldest first. Viewing a
    /// conversation marks the peer's messages as read.
    #[instrument(skip(self))]
    pub async fn conversation(
        &self,
        user_id: Snowflake,
        peer_id: Snowflake,
        limit: Option<i64>,
    ) -> GatewayResult<Vec<ChatMessage>> {
        let limit = limit.unwrap_or(100).clamp(1, 500);
        let messages = resolve_social_or_default(self.ctx.social_stores(), "messages_between", move |s| {
            Box::pin(async move { s.messages_between(user_id, peer_id, limit).await })
        })
        .await?;

        resolve_social(self.ctx.social_stores(), "mark_messages_read", move |s| {
            Box::pin(async move { s.mark_messages_read(user_id, peer_id).await })
        })
        .await
        .ok();

        Ok(messages)
    }

    /// One summary row per peer the caller has messaged with, most recent
    /// conversation first.
    #[instrument(skip(self))]
    pub async fn conversations(&self, user_id: Snowflake) -> GatewayResult<Vec<ConversationSummary>> {
        let messages =
            resolve_social_or_default(self.ctx.social_stores(), "messages_involving", move |s| {
                Box::pin(async move {
                    s.messages_involving(user_id, CONVERSATION_SCAN_LIMIT).await
                })
            })
            .await?;

        let mut summaries = fold_conversations(user_id, &messages);

        // Peers whose latest message was sent by the caller carry no name in
        // the message rows; fill those in from the profile store.
        for summary in &mut summaries {
            if summary.peer_name.is_empty() {
                summary.peer_name = match self.ctx.profile_store().profile(summary.peer_id).await {
                    Ok(profile) => profile.display_name,
                    Err(_) => summary.peer_id.to_string(),
                };
            }
        }

        Ok(summaries)
    }

    /// Mark every message from `peer_id` to the caller as read.
    #[instrument(skip(self))]
    pub async fn mark_read(&self, user_id: Snowflake, peer_id: Snowflake) -> GatewayResult<()> {
        resolve_social(self.ctx.social_stores(), "mark_messages_read", move |s| {
            Box::pin(async move { s.mark_messages_read(user_id, peer_id).await })
        })
        .await
    }

    /// Total unread messages addressed to the caller.
    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: Snowflake) -> GatewayResult<i64> {
        resolve_social_or_default(self.ctx.social_stores(), "unread_count", move |s| {
            Box::pin(async move { s.unread_count(user_id).await })
        })
        .await
    }
}

/// Fold a newest-first message list into one summary per peer. Peers whose
/// latest message came from `user_id` get an empty name for the caller to
/// backfill.
fn fold_conversations(user_id: Snowflake, messages: &[ChatMessage]) -> Vec<ConversationSummary> {
    let mut index: HashMap<Snowflake, usize> = HashMap::new();
    let mut summaries: Vec<ConversationSummary> = Vec::new();

    for msg in messages {
        let peer_id = msg.counterpart(user_id);
        let unread = i64::from(msg.recipient_id == user_id && !msg.read);

        if let Some(&i) = index.get(&peer_id) {
            summaries[i].unread_count += unread;
        } else {
            let peer_name = if msg.sender_id == peer_id {
                msg.sender_name.clone()
            } else {
                String::new()
            };
            index.insert(peer_id, summaries.len());
            summaries.push(ConversationSummary {
                peer_id,
                peer_name,
                last_message: msg.content.clone(),
                last_message_at: msg.created_at,
                unread_count: unread,
            });
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn msg(id: i64, from: i64, to: i64, content: &str, read: bool) -> ChatMessage {
        let mut m = ChatMessage::new(
            Snowflake::new(id),
            Snowflake::new(from),
            format!("user-{from}"),
            Snowflake::new(to),
            content,
        );
        m.read = read;
        m.created_at = Utc::now();
        m
    }

    #[test]
    fn test_fold_groups_by_peer_and_counts_unread() {
        let me = Snowflake::new(1);
        // Newest first, as messages_involving returns them.
        let messages = vec![
            msg(30, 2, 1, "latest from bob", false),
            msg(29, 1, 2, "my reply", true),
            msg(28, 2, 1, "older from bob", false),
            msg(27, 3, 1, "hello from carol", true),
        ];

        let summaries = fold_conversations(me, &messages);
        assert_eq!(summaries.len(), 2);

        assert_eq!(summaries[0].peer_id, Snowflake::new(2));
        assert_eq!(summaries[0].peer_name, "user-2");
        assert_eq!(summaries[0].last_message, "latest from bob");
        assert_eq!(summaries[0].unread_count, 2);

        assert_eq!(summaries[1].peer_id, Snowflake::new(3));
        assert_eq!(summaries[1].unread_count, 0);
    }

    #[test]
    fn test_fold_leaves_name_empty_when_latest_is_outgoing() {
        let me = Snowflake::new(1);
        let messages = vec![msg(10, 1, 5, "are you there?", false)];

        let summaries = fold_conversations(me, &messages);
        assert_eq!(summaries.len(), 1);
        assert!(summaries[0].peer_name.is_empty());
        // Own sent message is never unread for the sender.
        assert_eq!(summaries[0].unread_count, 0);
    }
}
