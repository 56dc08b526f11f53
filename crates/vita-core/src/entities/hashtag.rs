//! Hashtag aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Usage statistics for a single hashtag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hashtag {
    /// Normalized name, lowercase and without the leading '#'.
    pub name: String,
    pub use_count: i64,
    pub last_used_at: DateTime<Utc>,
}

impl Hashtag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            use_count: 1,
            last_used_at: Utc::now(),
        }
    }
}
