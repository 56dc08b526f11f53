//! Notification service and the best-effort recording helper
//!
//! Notifications are side effects of other operations (likes, comments,
//! friend requests, messages). Recording one must never fail the operation
//! that triggered it.

use tracing::{debug, instrument, warn};
use vita_core::{Notification, Snowflake};

use super::context::GatewayContext;
use super::error::GatewayResult;
use super::resolve::{resolve_social, resolve_social_or_default};

/// Store a notification and fan it out, swallowing all failures.
pub(crate) async fn record_notification(ctx: &GatewayContext, notification: Notification) {
    let stored = resolve_social(ctx.social_stores(), "create_notification", {
        let notification = notification.clone();
        move |s| {
            let notification = notification.clone();
            Box::pin(async move { s.create_notification(&notification).await })
        }
    })
    .await;

    match stored {
        Ok(()) => {
            if let Some(publisher) = ctx.publisher() {
                if let Ok(data) = serde_json::to_value(&notification) {
                    publisher
                        .publish_notification_created(notification.recipient_id, data)
                        .await
                        .ok();
                }
            }
        }
        Err(err) => {
            warn!(
                recipient = %notification.recipient_id,
                kind = notification.kind.as_str(),
                error = %err,
                "failed to record notification"
            );
        }
    }
}

/// Notification queries and read tracking
pub struct NotificationService<'a> {
    ctx: &'a GatewayContext,
}

impl<'a> NotificationService<'a> {
    pub fn new(ctx: &'a GatewayContext) -> Self {
        Self { ctx }
    }

    /// Notifications for a user, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake, limit: i64) -> GatewayResult<Vec<Notification>> {
        let limit = limit.clamp(1, 100);
        resolve_social_or_default(self.ctx.social_stores(), "notifications_for", move |s| {
            Box::pin(async move { s.notifications_for(user_id, limit).await })
        })
        .await
    }

    /// Mark a single notification as read.
    #[instrument(skip(self))]
    pub async fn mark_read(&self, id: Snowflake) -> GatewayResult<()> {
        resolve_social(self.ctx.social_stores(), "mark_notification_read", move |s| {
            Box::pin(async move { s.mark_notification_read(id).await })
        })
        .await?;

        debug!(notification_id = %id, "notification marked read");
        Ok(())
    }
}
