//! Summary types returned by the aggregator
//!
//! Every summary carries a `synthetic` flag so charts can label placeholder
//! data. Synthetic series have exactly one point per calendar day in the
//! requested window; real series only cover days with logs.

use chrono::NaiveDate;
use serde::Serialize;

/// One day of nutrition totals
#[derive(Debug, Clone, Serialize)]
pub struct NutritionDay {
    pub date: NaiveDate,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub meal_count: i64,
}

/// Nutrition window summary
#[derive(Debug, Clone, Serialize)]
pub struct NutritionSummary {
    pub days: Vec<NutritionDay>,
    pub avg_calories: f64,
    pub avg_protein: f64,
    pub avg_carbs: f64,
    pub avg_fat: f64,
    pub synthetic: bool,
}

/// One day of sleep
#[derive(Debug, Clone, Serialize)]
pub struct SleepDay {
    pub date: NaiveDate,
    pub duration_hours: f64,
    pub quality: f64,
}

/// Sleep window summary
#[derive(Debug, Clone, Serialize)]
pub struct SleepSummary {
    pub days: Vec<SleepDay>,
    pub avg_duration_hours: f64,
    pub avg_quality: f64,
    /// Day with the highest quality score
    pub best_day: Option<NaiveDate>,
    /// Day with the lowest quality score
    pub worst_day: Option<NaiveDate>,
    pub synthetic: bool,
}

/// One day of physical activity
#[derive(Debug, Clone, Serialize)]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub steps: i64,
    pub active_minutes: i64,
    pub calories_burned: i64,
}

/// Activity window summary
#[derive(Debug, Clone, Serialize)]
pub struct ActivitySummary {
    pub days: Vec<ActivityDay>,
    pub avg_steps: f64,
    pub avg_active_minutes: f64,
    pub avg_calories_burned: f64,
    pub synthetic: bool,
}

/// One day of app usage
#[derive(Debug, Clone, Serialize)]
pub struct AppUsageDay {
    pub date: NaiveDate,
    pub session_count: i64,
    pub total_minutes: i64,
}

/// App usage window summary
#[derive(Debug, Clone, Serialize)]
pub struct AppUsageSummary {
    pub days: Vec<AppUsageDay>,
    pub avg_sessions_per_day: f64,
    pub avg_minutes_per_day: f64,
    pub synthetic: bool,
}
