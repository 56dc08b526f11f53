//! Analytics aggregation service
//!
//! Buckets health logs into per-day points over a trailing window. An empty
//! window produces a synthetic series instead of an empty chart; store
//! errors surface to the caller (the dashboard is the one place with a
//! retry UI, so it must see real failures).

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, Utc};
use tracing::{info, instrument};
use vita_core::{DomainError, HealthLogStoreRef, Snowflake};

use crate::summaries::{
    ActivityDay, ActivitySummary, AppUsageDay, AppUsageSummary, NutritionDay, NutritionSummary,
    SleepDay, SleepSummary,
};
use crate::synthetic;

/// Result type for analytics operations
pub type AnalyticsResult<T> = Result<T, DomainError>;

/// Maximum analysis window in days
const MAX_WINDOW_DAYS: u32 = 365;

/// Aggregates health logs into dashboard summaries
#[derive(Clone)]
pub struct AnalyticsService {
    store: HealthLogStoreRef,
    default_days: u32,
}

impl AnalyticsService {
    pub fn new(store: HealthLogStoreRef, default_days: u32) -> Self {
        Self {
            store,
            default_days,
        }
    }

    fn window(&self, days: Option<u32>) -> u32 {
        days.unwrap_or(self.default_days).clamp(1, MAX_WINDOW_DAYS)
    }

    /// Per-day nutrition totals over the trailing window.
    #[instrument(skip(self))]
    pub async fn nutrition_summary(
        &self,
        user_id: Snowflake,
        days: Option<u32>,
    ) -> AnalyticsResult<NutritionSummary> {
        let days = self.window(days);
        let since = Utc::now() - Duration::days(i64::from(days));
        let meals = self.store.meals_since(user_id, since).await?;

        if meals.is_empty() {
            info!(user_id = %user_id, days, "no meals in window, serving synthetic series");
            return Ok(summarize_nutrition(synthetic::nutrition_series(days), true));
        }

        let mut buckets: BTreeMap<NaiveDate, NutritionDay> = BTreeMap::new();
        for meal in meals {
            let date = meal.logged_at.date_naive();
            let day = buckets.entry(date).or_insert(NutritionDay {
                date,
                calories: 0.0,
                protein: 0.0,
                carbs: 0.0,
                fat: 0.0,
                meal_count: 0,
            });
            day.calories += meal.calories;
            day.protein += meal.protein;
            day.carbs += meal.carbs;
            day.fat += meal.fat;
            day.meal_count += 1;
        }

        Ok(summarize_nutrition(
            buckets.into_values().collect(),
            false,
        ))
    }

    /// Per-day sleep duration and quality over the trailing window.
    #[instrument(skip(self))]
    pub async fn sleep_summary(
        &self,
        user_id: Snowflake,
        days: Option<u32>,
    ) -> AnalyticsResult<SleepSummary> {
        let days = self.window(days);
        let since = Utc::now() - Duration::days(i64::from(days));
        let logs = self.store.sleep_since(user_id, since).await?;

        if logs.is_empty() {
            info!(user_id = %user_id, days, "no sleep logs in window, serving synthetic series");
            return Ok(summarize_sleep(synthetic::sleep_series(days), true));
        }

        // A session counts towards the day it ended, so an overnight sleep
        // starting on Monday belongs to Tuesday.
        let mut buckets: BTreeMap<NaiveDate, (f64, f64, i64)> = BTreeMap::new();
        for log in logs {
            let date = log.ended_at.date_naive();
            let entry = buckets.entry(date).or_insert((0.0, 0.0, 0));
            entry.0 += log.duration_hours;
            entry.1 += f64::from(log.quality);
            entry.2 += 1;
        }

        let series = buckets
            .into_iter()
            .map(|(date, (duration, quality_sum, count))| SleepDay {
                date,
                duration_hours: duration,
                quality: quality_sum / count as f64,
            })
            .collect();

        Ok(summarize_sleep(series, false))
    }

    /// Per-day activity totals over the trailing window.
    #[instrument(skip(self))]
    pub async fn activity_summary(
        &self,
        user_id: Snowflake,
        days: Option<u32>,
    ) -> AnalyticsResult<ActivitySummary> {
        let days = self.window(days);
        let since = Utc::now() - Duration::days(i64::from(days));
        let logs = self.store.activity_since(user_id, since).await?;

        if logs.is_empty() {
            info!(user_id = %user_id, days, "no activity in window, serving synthetic series");
            return Ok(summarize_activity(synthetic::activity_series(days), true));
        }

        let mut buckets: BTreeMap<NaiveDate, ActivityDay> = BTreeMap::new();
        for log in logs {
            let date = log.logged_at.date_naive();
            let day = buckets.entry(date).or_insert(ActivityDay {
                date,
                steps: 0,
                active_minutes: 0,
                calories_burned: 0,
            });
            day.steps += log.steps;
            day.active_minutes += log.active_minutes;
            day.calories_burned += log.calories_burned;
        }

        Ok(summarize_activity(buckets.into_values().collect(), false))
    }

    /// Per-day session counts and screen time over the trailing window.
    #[instrument(skip(self))]
    pub async fn app_usage_summary(
        &self,
        user_id: Snowflake,
        days: Option<u32>,
    ) -> AnalyticsResult<AppUsageSummary> {
        let days = self.window(days);
        let since = Utc::now() - Duration::days(i64::from(days));
        let sessions = self.store.app_sessions_since(user_id, since).await?;

        if sessions.is_empty() {
            info!(user_id = %user_id, days, "no app sessions in window, serving synthetic series");
            return Ok(summarize_app_usage(synthetic::app_usage_series(days), true));
        }

        let mut buckets: BTreeMap<NaiveDate, AppUsageDay> = BTreeMap::new();
        for session in sessions {
            let date = session.started_at.date_naive();
            let day = buckets.entry(date).or_insert(AppUsageDay {
                date,
                session_count: 0,
                total_minutes: 0,
            });
            day.session_count += 1;
            day.total_minutes += session.duration_minutes;
        }

        Ok(summarize_app_usage(buckets.into_values().collect(), false))
    }
}

impl std::fmt::Debug for AnalyticsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsService")
            .field("default_days", &self.default_days)
            .finish_non_exhaustive()
    }
}

fn summarize_nutrition(days: Vec<NutritionDay>, synthetic: bool) -> NutritionSummary {
    let n = days.len().max(1) as f64;
    NutritionSummary {
        avg_calories: days.iter().map(|d| d.calories).sum::<f64>() / n,
        avg_protein: days.iter().map(|d| d.protein).sum::<f64>() / n,
        avg_carbs: days.iter().map(|d| d.carbs).sum::<f64>() / n,
        avg_fat: days.iter().map(|d| d.fat).sum::<f64>() / n,
        days,
        synthetic,
    }
}

fn summarize_sleep(days: Vec<SleepDay>, synthetic: bool) -> SleepSummary {
    let n = days.len().max(1) as f64;
    let best_day = days
        .iter()
        .max_by(|a, b| a.quality.total_cmp(&b.quality))
        .map(|d| d.date);
    let worst_day = days
        .iter()
        .min_by(|a, b| a.quality.total_cmp(&b.quality))
        .map(|d| d.date);

    SleepSummary {
        avg_duration_hours: days.iter().map(|d| d.duration_hours).sum::<f64>() / n,
        avg_quality: days.iter().map(|d| d.quality).sum::<f64>() / n,
        best_day,
        worst_day,
        days,
        synthetic,
    }
}

fn summarize_activity(days: Vec<ActivityDay>, synthetic: bool) -> ActivitySummary {
    let n = days.len().max(1) as f64;
    ActivitySummary {
        avg_steps: days.iter().map(|d| d.steps as f64).sum::<f64>() / n,
        avg_active_minutes: days.iter().map(|d| d.active_minutes as f64).sum::<f64>() / n,
        avg_calories_burned: days.iter().map(|d| d.calories_burned as f64).sum::<f64>() / n,
        days,
        synthetic,
    }
}

fn summarize_app_usage(days: Vec<AppUsageDay>, synthetic: bool) -> AppUsageSummary {
    let n = days.len().max(1) as f64;
    AppUsageSummary {
        avg_sessions_per_day: days.iter().map(|d| d.session_count as f64).sum::<f64>() / n,
        avg_minutes_per_day: days.iter().map(|d| d.total_minutes as f64).sum::<f64>() / n,
        days,
        synthetic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_nutrition_averages() {
        let date = Utc::now().date_naive();
        let days = vec![
            NutritionDay {
                date,
                calories: 1800.0,
                protein: 80.0,
                carbs: 200.0,
                fat: 60.0,
                meal_count: 3,
            },
            NutritionDay {
                date,
                calories: 2200.0,
                protein: 100.0,
                carbs: 250.0,
                fat: 70.0,
                meal_count: 4,
            },
        ];

        let summary = summarize_nutrition(days, false);
        assert!((summary.avg_calories - 2000.0).abs() < f64::EPSILON);
        assert!((summary.avg_protein - 90.0).abs() < f64::EPSILON);
        assert!(!summary.synthetic);
    }

    #[test]
    fn test_summarize_sleep_best_and_worst() {
        let d1 = Utc::now().date_naive();
        let d2 = d1 - Duration::days(1);
        let days = vec![
            SleepDay {
                date: d2,
                duration_hours: 8.0,
                quality: 9.0,
            },
            SleepDay {
                date: d1,
                duration_hours: 5.0,
                quality: 4.0,
            },
        ];

        let summary = summarize_sleep(days, false);
        assert_eq!(summary.best_day, Some(d2));
        assert_eq!(summary.worst_day, Some(d1));
    }

    #[test]
    fn test_empty_series_does_not_divide_by_zero() {
        let summary = summarize_activity(Vec::new(), false);
        assert_eq!(summary.days.len(), 0);
        assert!(summary.avg_steps.abs() < f64::EPSILON);
    }
}
