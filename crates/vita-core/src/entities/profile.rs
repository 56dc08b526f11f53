//! User profile entity

use crate::value_objects::Snowflake;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user's public profile.
///
/// Credentials (password hash) are stored separately by the profile store
/// and never travel with this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Snowflake,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(id: Snowflake, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: email.into(),
            display_name: display_name.into(),
            avatar_url: None,
            bio: None,
            created_at: now,
            updated_at: now,
        }
    }
}
