//! Health log service
//!
//! Meals, sleep, activity, and app usage go to a single relational store;
//! there is no fallback tier for health data.

use chrono::{Duration, Utc};
use tracing::{info, instrument};
use validator::Validate;
use vita_core::{ActivityLog, AppSession, MealLog, SleepLog, Snowflake};

use crate::dto::{LogActivityRequest, LogAppSessionRequest, LogMealRequest, LogSleepRequest};

use super::context::GatewayContext;
use super::error::{GatewayError, GatewayResult};

pub struct HealthLogService<'a> {
    ctx: &'a GatewayContext,
}

impl<'a> HealthLogService<'a> {
    pub fn new(ctx: &'a GatewayContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request))]
    pub async fn log_meal(
        &self,
        user_id: Snowflake,
        request: LogMealRequest,
    ) -> GatewayResult<MealLog> {
        request
            .validate()
            .map_err(|e| GatewayError::validation(e.to_string()))?;

        let log = MealLog {
            id: self.ctx.generate_id(),
            user_id,
            description: request.description.trim().to_string(),
            calories: request.calories,
            protein: request.protein,
            carbs: request.carbs,
            fat: request.fat,
            logged_at: request.logged_at.unwrap_or_else(Utc::now),
        };
        self.ctx.health_store().insert_meal(&log).await?;

        info!(log_id = %log.id, "meal logged");
        Ok(log)
    }

    #[instrument(skip(self, request))]
    pub async fn log_sleep(
        &self,
        user_id: Snowflake,
        request: LogSleepRequest,
    ) -> GatewayResult<SleepLog> {
        request
            .validate()
            .map_err(|e| GatewayError::validation(e.to_string()))?;
        if request.ended_at <= request.started_at {
            return Err(GatewayError::validation("Sleep must end after it starts"));
        }

        let log = SleepLog {
            id: self.ctx.generate_id(),
            user_id,
            duration_hours: request.duration_hours,
            quality: request.quality,
            started_at: request.started_at,
            ended_at: request.ended_at,
        };
        self.ctx.health_store().insert_sleep(&log).await?;

        info!(log_id = %log.id, "sleep logged");
        Ok(log)
    }

    #[instrument(skip(self, request))]
    pub async fn log_activity(
        &self,
        user_id: Snowflake,
        request: LogActivityRequest,
    ) -> GatewayResult<ActivityLog> {
        request
            .validate()
            .map_err(|e| GatewayError::validation(e.to_string()))?;

        let log = ActivityLog {
            id: self.ctx.generate_id(),
            user_id,
            steps: request.steps,
            active_minutes: request.active_minutes,
            calories_burned: request.calories_burned,
            logged_at: request.logged_at.unwrap_or_else(Utc::now),
        };
        self.ctx.health_store().insert_activity(&log).await?;

        info!(log_id = %log.id, "activity logged");
        Ok(log)
    }

    #[instrument(skip(self, request))]
    pub async fn log_app_session(
        &self,
        user_id: Snowflake,
        request: LogAppSessionRequest,
    ) -> GatewayResult<AppSession> {
        request
            .validate()
            .map_err(|e| GatewayError::validation(e.to_string()))?;

        let session = AppSession {
            id: self.ctx.generate_id(),
            user_id,
            duration_minutes: request.duration_minutes,
            started_at: request.started_at,
        };
        self.ctx.health_store().insert_app_session(&session).await?;

        info!(session_id = %session.id, "app session logged");
        Ok(session)
    }

    /// Meals within the last `days` days.
    #[instrument(skip(self))]
    pub async fn meals(&self, user_id: Snowflake, days: u32) -> GatewayResult<Vec<MealLog>> {
        let since = Utc::now() - Duration::days(i64::from(days));
        Ok(self.ctx.health_store().meals_since(user_id, since).await?)
    }

    /// Sleep logs within the last `days` days.
    #[instrument(skip(self))]
    pub async fn sleep(&self, user_id: Snowflake, days: u32) -> GatewayResult<Vec<SleepLog>> {
        let since = Utc::now() - Duration::days(i64::from(days));
        Ok(self.ctx.health_store().sleep_since(user_id, since).await?)
    }

    /// Activity logs within the last `days` days.
    #[instrument(skip(self))]
    pub async fn activity(&self, user_id: Snowflake, days: u32) -> GatewayResult<Vec<ActivityLog>> {
        let since = Utc::now() - Duration::days(i64::from(days));
        Ok(self.ctx.health_store().activity_since(user_id, since).await?)
    }
}
