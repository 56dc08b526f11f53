//! Group channel service
//!
//! Group channels are public: any user can join, leave, and post without a
//! membership check. The member counter is adjusted atomically by the store
//! and floored at zero, so racing joins and leaves cannot drive it negative.

use tracing::{info, instrument, warn};
use validator::Validate;
use vita_core::{
    ChatGroup, ChatGroupMessage, DomainError, Snowflake, UserProfile, MAX_MESSAGE_LENGTH,
};

use crate::dto::{CreateGroupRequest, GroupMembershipOutcome, SendGroupMessageRequest};

use super::context::GatewayContext;
use super::error::{GatewayError, GatewayResult};
use super::resolve::{resolve_social, resolve_social_or_default};

pub struct GroupService<'a> {
    ctx: &'a GatewayContext,
}

impl<'a> GroupService<'a> {
    pub fn new(ctx: &'a GatewayContext) -> Self {
        Self { ctx }
    }

    /// Create a group channel. The owner joins automatically.
    #[instrument(skip(self, owner, request), fields(owner_id = %owner.id))]
    pub async fn create_group(
        &self,
        owner: &UserProfile,
        request: CreateGroupRequest,
    ) -> GatewayResult<ChatGroup> {
        request
            .validate()
            .map_err(|e| GatewayError::validation(e.to_string()))?;

        let name = request.name.trim();
        if name.is_empty() {
            return Err(GatewayError::validation("Group name is required"));
        }

        let mut group = ChatGroup::new(self.ctx.generate_id(), owner.id, name);

        resolve_social(self.ctx.social_stores(), "create_group", {
            let group = group.clone();
            move |s| {
                let group = group.clone();
                Box::pin(async move { s.create_group(&group).await })
            }
        })
        .await?;

        group.member_count = self.join_inner(owner.id, group.id, 0).await?.member_count;

        info!(group_id = %group.id, "group created");
        Ok(group)
    }

    /// Fetch a single group channel.
    #[instrument(skip(self))]
    pub async fn group(&self, group_id: Snowflake) -> GatewayResult<ChatGroup> {
        resolve_social(self.ctx.social_stores(), "group", move |s| {
            Box::pin(async move { s.group(group_id).await })
        })
        .await
    }

    /// List group channels, newest first.
    #[instrument(skip(self))]
    pub async fn groups(&self, limit: Option<i64>) -> GatewayResult<Vec<ChatGroup>> {
        let limit = limit.unwrap_or(50).clamp(1, 100);
        resolve_social_or_default(self.ctx.social_stores(), "groups", move |s| {
            Box::pin(async move { s.groups(limit).await })
        })
        .await
    }

    /// Join a group channel. Joining twice is a no-op.
    #[instrument(skip(self))]
    pub async fn join(
        &self,
        user_id: Snowflake,
        group_id: Snowflake,
    ) -> GatewayResult<GroupMembershipOutcome> {
        // Surface GroupNotFound before touching the membership set.
        let group = self.group(group_id).await?;

        let outcome = self.join_inner(user_id, group_id, group.member_count).await?;
        if outcome.changed {
            info!(group_id = %group_id, member_count = outcome.member_count, "group joined");
        }
        Ok(outcome)
    }

    /// Leave a group channel. Leaving without a membership is a no-op.
    #[instrument(skip(self))]
    pub async fn leave(
        &self,
        user_id: Snowflake,
        group_id: Snowflake,
    ) -> GatewayResult<GroupMembershipOutcome> {
        let group = self.group(group_id).await?;

        let removed = resolve_social(self.ctx.social_stores(), "remove_group_member", move |s| {
            Box::pin(async move { s.remove_group_member(group_id, user_id).await })
        })
        .await?;
        if !removed {
            return Ok(GroupMembershipOutcome {
                changed: false,
                member_count: group.member_count,
            });
        }

        // The counter is a best-effort denormalization; the membership row is
        // already removed.
        let member_count = resolve_social(
            self.ctx.social_stores(),
            "adjust_group_member_count",
            move |s| Box::pin(async move { s.adjust_group_member_count(group_id, -1).await }),
        )
        .await
        .unwrap_or_else(|err| {
            warn!(group_id = %group_id, error = %err, "failed to lower member counter");
            (group.member_count - 1).max(0)
        });

        info!(group_id = %group_id, member_count, "group left");
        Ok(GroupMembershipOutcome {
            changed: true,
            member_count,
        })
    }

    /// Post a message into a group channel on behalf of `sender`.
    #[instrument(skip(self, sender, request), fields(sender_id = %sender.id))]
    pub async fn send_message(
        &self,
        sender: &UserProfile,
        group_id: Snowflake,
        request: SendGroupMessageRequest,
    ) -> GatewayResult<ChatGroupMessage> {
        request
            .validate()
            .map_err(|e| GatewayError::validation(e.to_string()))?;

        let content = request.content.trim();
        if content.is_empty() {
            return Err(GatewayError::validation("Message content is required"));
        }
        let length = content.chars().count();
        if length > MAX_MESSAGE_LENGTH {
            return Err(GatewayError::Domain(DomainError::ContentTooLong {
                length,
                max: MAX_MESSAGE_LENGTH,
            }));
        }

        // Surface GroupNotFound before writing the message.
        self.group(group_id).await?;

        let mut message = ChatGroupMessage::new(
            self.ctx.generate_id(),
            group_id,
            sender.id,
            sender.display_name.clone(),
            content,
        );
        if request.is_sticker {
            message = message.as_sticker();
        }

        resolve_social(self.ctx.social_stores(), "create_group_message", {
            let message = message.clone();
            move |s| {
                let message = message.clone();
                Box::pin(async move { s.create_group_message(&message).await })
            }
        })
        .await?;

        if let Some(publisher) = self.ctx.publisher() {
            if let Ok(data) = serde_json::to_value(&message) {
                publisher
                    .publish_group_message_created(group_id, data)
                    .await
                    .ok();
            }
        }

        info!(message_id = %message.id, group_id = %group_id, "group message sent");
        Ok(message)
    }

    /// Messages in a group channel, oldest first.
    #[instrument(skip(self))]
    pub async fn messages(
        &self,
        group_id: Snowflake,
        limit: Option<i64>,
    ) -> GatewayResult<Vec<ChatGroupMessage>> {
        self.group(group_id).await?;

        let limit = limit.unwrap_or(100).clamp(1, 500);
        resolve_social_or_default(self.ctx.social_stores(), "group_messages", move |s| {
            Box::pin(async move { s.group_messages(group_id, limit).await })
        })
        .await
    }

    async fn join_inner(
        &self,
        user_id: Snowflake,
        group_id: Snowflake,
        prior_count: i64,
    ) -> GatewayResult<GroupMembershipOutcome> {
        let added = resolve_social(self.ctx.social_stores(), "add_group_member", move |s| {
            Box::pin(async move { s.add_group_member(group_id, user_id).await })
        })
        .await?;
        if !added {
            return Ok(GroupMembershipOutcome {
                changed: false,
                member_count: prior_count,
            });
        }

        // The counter is a best-effort denormalization; the membership row is
        // already persisted.
        let member_count = resolve_social(
            self.ctx.social_stores(),
            "adjust_group_member_count",
            move |s| Box::pin(async move { s.adjust_group_member_count(group_id, 1).await }),
        )
        .await
        .unwrap_or_else(|err| {
            warn!(group_id = %group_id, error = %err, "failed to bump member counter");
            prior_count + 1
        });

        Ok(GroupMembershipOutcome {
            changed: true,
            member_count,
        })
    }
}
