//! Health tracking entities: meals, sleep, activity, and app usage

use crate::value_objects::Snowflake;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A logged meal with its macronutrient breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealLog {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub description: String,
    pub calories: f64,
    /// Grams of protein
    pub protein: f64,
    /// Grams of carbohydrates
    pub carbs: f64,
    /// Grams of fat
    pub fat: f64,
    pub logged_at: DateTime<Utc>,
}

/// A logged sleep session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepLog {
    pub id: Snowflake,
    pub user_id: Snowflake,
    /// Sleep duration in hours
    pub duration_hours: f64,
    /// Subjective quality score, 1-10
    pub quality: u8,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

/// A day's physical activity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub steps: i64,
    pub active_minutes: i64,
    pub calories_burned: i64,
    pub logged_at: DateTime<Utc>,
}

/// One app usage session, used for screen-time analytics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSession {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub duration_minutes: i64,
    pub started_at: DateTime<Utc>,
}
