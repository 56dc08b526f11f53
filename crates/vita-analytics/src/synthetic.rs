//! Synthetic series generation
//!
//! When a user has no logs in the requested window the dashboard still needs
//! something to draw. These generators produce bounded-realistic placeholder
//! series: one point per calendar day ending today, values inside everyday
//! human ranges.

use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;

use crate::summaries::{ActivityDay, AppUsageDay, NutritionDay, SleepDay};

/// The last `days` calendar days, oldest first, ending today (UTC).
pub(crate) fn window_dates(days: u32) -> Vec<NaiveDate> {
    let today = Utc::now().date_naive();
    (0..i64::from(days))
        .rev()
        .map(|offset| today - Duration::days(offset))
        .collect()
}

/// Nutrition placeholder: ~2000 kcal days with macros at typical shares of
/// total calories (protein 12-18%, carbs 45-55%, fat 25-35%).
pub(crate) fn nutrition_series(days: u32) -> Vec<NutritionDay> {
    let mut rng = rand::thread_rng();
    window_dates(days)
        .into_iter()
        .map(|date| {
            let calories = 2000.0 + rng.gen_range(-200.0..=200.0);
            let protein = calories * rng.gen_range(0.12..=0.18) / 4.0;
            let carbs = calories * rng.gen_range(0.45..=0.55) / 4.0;
            let fat = calories * rng.gen_range(0.25..=0.35) / 9.0;
            NutritionDay {
                date,
                calories,
                protein,
                carbs,
                fat,
                meal_count: 3,
            }
        })
        .collect()
}

/// Sleep placeholder: 6-9 hours at quality 5-9.
pub(crate) fn sleep_series(days: u32) -> Vec<SleepDay> {
    let mut rng = rand::thread_rng();
    window_dates(days)
        .into_iter()
        .map(|date| SleepDay {
            date,
            duration_hours: rng.gen_range(6.0..=9.0),
            quality: f64::from(rng.gen_range(5_u8..=9)),
        })
        .collect()
}

/// Activity placeholder: a moderately active day.
pub(crate) fn activity_series(days: u32) -> Vec<ActivityDay> {
    let mut rng = rand::thread_rng();
    window_dates(days)
        .into_iter()
        .map(|date| ActivityDay {
            date,
            steps: rng.gen_range(3000..8000),
            active_minutes: rng.gen_range(30..90),
            calories_burned: rng.gen_range(200..500),
        })
        .collect()
}

/// App usage placeholder: 1-8 sessions of 5-40 minutes each.
pub(crate) fn app_usage_series(days: u32) -> Vec<AppUsageDay> {
    let mut rng = rand::thread_rng();
    window_dates(days)
        .into_iter()
        .map(|date| {
            let session_count = rng.gen_range(1_i64..=8);
            let total_minutes = (0..session_count).map(|_| rng.gen_range(5_i64..=40)).sum();
            AppUsageDay {
                date,
                session_count,
                total_minutes,
            }
        })
        .collect()
}
