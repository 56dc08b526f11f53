//! Health log entity <-> model mappers

use vita_core::entities::{ActivityLog, AppSession, MealLog, SleepLog};
use vita_core::Snowflake;

use crate::models::{ActivityModel, AppSessionModel, MealModel, SleepModel};

impl From<MealModel> for MealLog {
    fn from(model: MealModel) -> Self {
        MealLog {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            description: model.description,
            calories: model.calories,
            protein: model.protein,
            carbs: model.carbs,
            fat: model.fat,
            logged_at: model.logged_at,
        }
    }
}

impl From<SleepModel> for SleepLog {
    fn from(model: SleepModel) -> Self {
        SleepLog {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            duration_hours: model.duration_hours,
            quality: model.quality.clamp(0, 10) as u8,
            started_at: model.started_at,
            ended_at: model.ended_at,
        }
    }
}

impl From<ActivityModel> for ActivityLog {
    fn from(model: ActivityModel) -> Self {
        ActivityLog {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            steps: model.steps,
            active_minutes: model.active_minutes,
            calories_burned: model.calories_burned,
            logged_at: model.logged_at,
        }
    }
}

impl From<AppSessionModel> for AppSession {
    fn from(model: AppSessionModel) -> Self {
        AppSession {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            duration_minutes: model.duration_minutes,
            started_at: model.started_at,
        }
    }
}
