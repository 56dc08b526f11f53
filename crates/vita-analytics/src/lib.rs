//! # vita-analytics
//!
//! Health analytics aggregator. Buckets a user's meal, sleep, activity, and
//! app usage logs into per-day dashboard summaries, and degrades to
//! bounded-realistic synthetic series when a window holds no data.

mod service;
mod summaries;
mod synthetic;

pub use service::{AnalyticsResult, AnalyticsService};
pub use summaries::{
    ActivityDay, ActivitySummary, AppUsageDay, AppUsageSummary, NutritionDay, NutritionSummary,
    SleepDay, SleepSummary,
};
