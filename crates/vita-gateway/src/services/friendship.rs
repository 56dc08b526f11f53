//! Friendship service
//!
//! Friendships are a single directed edge per user pair. Sending a request
//! when the other side already has one pending accepts it instead of creating
//! a duplicate edge.

use chrono::Utc;
use tracing::{info, instrument};
use vita_core::{
    DomainError, Friendship, FriendshipStatus, Notification, NotificationKind, Snowflake,
    UserProfile,
};

use crate::dto::FriendRequestOutcome;

use super::context::GatewayContext;
use super::error::{GatewayError, GatewayResult};
use super::notification::record_notification;
use super::resolve::{resolve_social, resolve_social_or_default};

pub struct FriendshipService<'a> {
    ctx: &'a GatewayContext,
}

impl<'a> FriendshipService<'a> {
    pub fn new(ctx: &'a GatewayContext) -> Self {
        Self { ctx }
    }

    /// Send a friend request from `requester` to `addressee_id`.
    ///
    /// If the addressee already has a pending request towards the requester,
    /// that request is accepted and no new edge is created.
    #[instrument(skip(self, requester), fields(requester_id = %requester.id))]
    pub async fn send_request(
        &self,
        requester: &UserProfile,
        addressee_id: Snowflake,
    ) -> GatewayResult<FriendRequestOutcome> {
        if addressee_id == requester.id {
            return Err(GatewayError::validation("Cannot befriend yourself"));
        }

        // The addressee must be a real account.
        self.ctx.profile_store().profile(addressee_id).await?;

        let requester_id = requester.id;
        let existing =
            resolve_social(self.ctx.social_stores(), "friendship_between", move |s| {
                Box::pin(async move { s.friendship_between(requester_id, addressee_id).await })
            })
            .await?;

        match existing {
            Some(f) if f.is_accepted() => Ok(FriendRequestOutcome {
                friendship: f,
                auto_accepted: false,
                message: "Already friends",
            }),
            Some(f)
                if f.status == FriendshipStatus::Pending && f.requester_id == addressee_id =>
            {
                // Reverse pending request: both sides want this, accept it.
                self.accept_edge(&f, requester).await?;

                let mut accepted = f;
                accepted.status = FriendshipStatus::Accepted;
                accepted.updated_at = Utc::now();

                info!(friendship_id = %accepted.id, "reverse pending request auto-accepted");
                Ok(FriendRequestOutcome {
                    friendship: accepted,
                    auto_accepted: true,
                    message: "Friend request accepted",
                })
            }
            Some(f) if f.status == FriendshipStatus::Pending => Ok(FriendRequestOutcome {
                friendship: f,
                auto_accepted: false,
                message: "Friend request already sent",
            }),
            Some(declined) => {
                // A declined edge does not block a fresh request.
                let edge_id = declined.id;
                resolve_social(self.ctx.social_stores(), "delete_friendship", move |s| {
                    Box::pin(async move { s.delete_friendship(edge_id).await })
                })
                .await?;
                self.create_request(requester, addressee_id).await
            }
            None => self.create_request(requester, addressee_id).await,
        }
    }

    /// Accept or decline a pending request addressed to `user`.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn respond(
        &self,
        user: &UserProfile,
        friendship_id: Snowflake,
        accept: bool,
    ) -> GatewayResult<Friendship> {
        let friendship = resolve_social(self.ctx.social_stores(), "friendship", move |s| {
            Box::pin(async move { s.friendship(friendship_id).await })
        })
        .await?;

        if friendship.addressee_id != user.id {
            return Err(GatewayError::forbidden(
                "Only the addressee can respond to a friend request",
            ));
        }
        if friendship.status != FriendshipStatus::Pending {
            return Err(GatewayError::App(vita_common::AppError::Conflict(
                "Friend request already handled".to_string(),
            )));
        }

        let status = if accept {
            FriendshipStatus::Accepted
        } else {
            FriendshipStatus::Declined
        };
        resolve_social(self.ctx.social_stores(), "set_friendship_status", move |s| {
            Box::pin(async move { s.set_friendship_status(friendship_id, status).await })
        })
        .await?;

        if accept {
            let notification = Notification::new(
                self.ctx.generate_id(),
                friendship.requester_id,
                user.id,
                user.display_name.clone(),
                NotificationKind::FriendAccept,
                format!("{} accepted your friend request", user.display_name),
            )
            .with_subject(friendship.id);
            record_notification(self.ctx, notification).await;
        }

        let mut updated = friendship;
        updated.status = status;
        updated.updated_at = Utc::now();

        info!(friendship_id = %friendship_id, status = %status, "friend request handled");
        Ok(updated)
    }

    /// Accepted friendships of a user.
    #[instrument(skip(self))]
    pub async fn friends(&self, user_id: Snowflake) -> GatewayResult<Vec<Friendship>> {
        resolve_social_or_default(self.ctx.social_stores(), "friendships_of", move |s| {
            Box::pin(async move {
                s.friendships_of(user_id, Some(FriendshipStatus::Accepted)).await
            })
        })
        .await
    }

    /// Pending requests addressed to a user.
    #[instrument(skip(self))]
    pub async fn pending_requests(&self, user_id: Snowflake) -> GatewayResult<Vec<Friendship>> {
        let pending = resolve_social_or_default(self.ctx.social_stores(), "friendships_of", move |s| {
            Box::pin(async move {
                s.friendships_of(user_id, Some(FriendshipStatus::Pending)).await
            })
        })
        .await?;

        Ok(pending
            .into_iter()
            .filter(|f| f.addressee_id == user_id)
            .collect())
    }

    /// Remove the friendship between the caller and a peer.
    #[instrument(skip(self))]
    pub async fn unfriend(&self, user_id: Snowflake, peer_id: Snowflake) -> GatewayResult<()> {
        let friendship =
            resolve_social(self.ctx.social_stores(), "friendship_between", move |s| {
                Box::pin(async move { s.friendship_between(user_id, peer_id).await })
            })
            .await?
            .ok_or_else(|| {
                GatewayError::Domain(DomainError::FriendshipNotFound(peer_id.to_string()))
            })?;

        let edge_id = friendship.id;
        resolve_social(self.ctx.social_stores(), "delete_friendship", move |s| {
            Box::pin(async move { s.delete_friendship(edge_id).await })
        })
        .await?;

        info!(friendship_id = %edge_id, "friendship removed");
        Ok(())
    }

    async fn accept_edge(&self, edge: &Friendship, acceptor: &UserProfile) -> GatewayResult<()> {
        let edge_id = edge.id;
        resolve_social(self.ctx.social_stores(), "set_friendship_status", move |s| {
            Box::pin(async move {
                s.set_friendship_status(edge_id, FriendshipStatus::Accepted).await
            })
        })
        .await?;

        let notification = Notification::new(
            self.ctx.generate_id(),
            edge.requester_id,
            acceptor.id,
            acceptor.display_name.clone(),
            NotificationKind::FriendAccept,
            format!("{} accepted your friend request", acceptor.display_name),
        )
        .with_subject(edge.id);
        record_notification(self.ctx, notification).await;

        Ok(())
    }

    async fn create_request(
        &self,
        requester: &UserProfile,
        addressee_id: Snowflake,
    ) -> GatewayResult<FriendRequestOutcome> {
        let friendship = Friendship::new(self.ctx.generate_id(), requester.id, addressee_id);

        resolve_social(self.ctx.social_stores(), "create_friendship", {
            let friendship = friendship.clone();
            move |s| {
                let friendship = friendship.clone();
                Box::pin(async move { s.create_friendship(&friendship).await })
            }
        })
        .await?;

        let notification = Notification::new(
            self.ctx.generate_id(),
            addressee_id,
            requester.id,
            requester.display_name.clone(),
            NotificationKind::FriendRequest,
            format!("{} sent you a friend request", requester.display_name),
        )
        .with_subject(friendship.id);
        record_notification(self.ctx, notification).await;

        info!(friendship_id = %friendship.id, "friend request sent");
        Ok(FriendRequestOutcome {
            friendship,
            auto_accepted: false,
            message: "Friend request sent",
        })
    }
}
