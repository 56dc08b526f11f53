//! Friendship entity and status lifecycle

use crate::value_objects::Snowflake;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a friendship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Declined,
}

impl FriendshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }
}

impl std::fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed friendship edge from requester to addressee.
///
/// Two users are friends when an edge between them in either direction
/// has status `Accepted`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friendship {
    pub id: Snowflake,
    pub requester_id: Snowflake,
    pub addressee_id: Snowflake,
    pub status: FriendshipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Friendship {
    pub fn new(id: Snowflake, requester_id: Snowflake, addressee_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            requester_id,
            addressee_id,
            status: FriendshipStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn involves(&self, user_id: Snowflake) -> bool {
        self.requester_id == user_id || self.addressee_id == user_id
    }

    pub fn is_accepted(&self) -> bool {
        self.status == FriendshipStatus::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_friendship_is_pending() {
        let f = Friendship::new(Snowflake::new(1), Snowflake::new(2), Snowflake::new(3));
        assert_eq!(f.status, FriendshipStatus::Pending);
        assert!(!f.is_accepted());
    }

    #[test]
    fn status_roundtrips_through_strings() {
        for status in [
            FriendshipStatus::Pending,
            FriendshipStatus::Accepted,
            FriendshipStatus::Declined,
        ] {
            assert_eq!(FriendshipStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(FriendshipStatus::parse("blocked"), None);
    }

    #[test]
    fn involves_checks_both_ends() {
        let f = Friendship::new(Snowflake::new(1), Snowflake::new(2), Snowflake::new(3));
        assert!(f.involves(Snowflake::new(2)));
        assert!(f.involves(Snowflake::new(3)));
        assert!(!f.involves(Snowflake::new(4)));
    }
}
