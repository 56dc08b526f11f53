//! Response DTOs returned by gateway services

use serde::Serialize;
use vita_common::TokenPair;
use vita_core::{Friendship, Hashtag, UserProfile};

/// Successful authentication: the user plus an access/refresh pair
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub tokens: TokenPair,
}

/// Result of a like or unlike operation
#[derive(Debug, Clone, Serialize)]
pub struct LikeOutcome {
    /// Whether this call changed the like state. Liking an already-liked
    /// post and unliking without a like report `false`.
    pub changed: bool,
    /// The post's like counter after the operation
    pub like_count: i64,
}

/// Result of joining or leaving a group channel
#[derive(Debug, Clone, Serialize)]
pub struct GroupMembershipOutcome {
    /// Whether this call changed the membership. Joining twice and leaving
    /// without a membership report `false`.
    pub changed: bool,
    /// The group's member counter after the operation
    pub member_count: i64,
}

/// Result of sending a friend request
#[derive(Debug, Clone, Serialize)]
pub struct FriendRequestOutcome {
    pub friendship: Friendship,
    /// True when a reverse pending request existed and was accepted instead
    pub auto_accepted: bool,
    pub message: &'static str,
}

/// Trending hashtag list
#[derive(Debug, Clone, Serialize)]
pub struct TrendingTags {
    pub tags: Vec<Hashtag>,
    /// True when no real usage data was available and a curated list was
    /// returned instead
    pub curated: bool,
}
