//! Health log database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the meal_logs table
#[derive(Debug, Clone, FromRow)]
pub struct MealModel {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub logged_at: DateTime<Utc>,
}

/// Database model for the sleep_logs table
#[derive(Debug, Clone, FromRow)]
pub struct SleepModel {
    pub id: i64,
    pub user_id: i64,
    pub duration_hours: f64,
    pub quality: i16,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

/// Database model for the activity_logs table
#[derive(Debug, Clone, FromRow)]
pub struct ActivityModel {
    pub id: i64,
    pub user_id: i64,
    pub steps: i64,
    pub active_minutes: i64,
    pub calories_burned: i64,
    pub logged_at: DateTime<Utc>,
}

/// Database model for the app_sessions table
#[derive(Debug, Clone, FromRow)]
pub struct AppSessionModel {
    pub id: i64,
    pub user_id: i64,
    pub duration_minutes: i64,
    pub started_at: DateTime<Utc>,
}
