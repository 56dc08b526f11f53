//! PostgreSQL implementation of HealthLogStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use vita_core::entities::{ActivityLog, AppSession, MealLog, SleepLog};
use vita_core::traits::{HealthLogStore, StoreResult};
use vita_core::Snowflake;

use crate::error::map_db_error;
use crate::models::{ActivityModel, AppSessionModel, MealModel, SleepModel};

/// PostgreSQL implementation of HealthLogStore
#[derive(Clone)]
pub struct PgHealthLogStore {
    pool: PgPool,
}

impl PgHealthLogStore {
    /// Create a new PgHealthLogStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthLogStore for PgHealthLogStore {
    #[instrument(skip(self, log), fields(log_id = %log.id))]
    async fn insert_meal(&self, log: &MealLog) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO meal_logs (id, user_id, description, calories, protein, carbs, fat, logged_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(log.id.into_inner())
        .bind(log.user_id.into_inner())
        .bind(&log.description)
        .bind(log.calories)
        .bind(log.protein)
        .bind(log.carbs)
        .bind(log.fat)
        .bind(log.logged_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn meals_since(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<MealLog>> {
        let results = sqlx::query_as::<_, MealModel>(
            r#"
            SELECT id, user_id, description, calories, protein, carbs, fat, logged_at
            FROM meal_logs
            WHERE user_id = $1 AND logged_at >= $2
            ORDER BY logged_at ASC
            "#,
        )
        .bind(user_id.into_inner())
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(MealLog::from).collect())
    }

    #[instrument(skip(self, log), fields(log_id = %log.id))]
    async fn insert_sleep(&self, log: &SleepLog) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sleep_logs (id, user_id, duration_hours, quality, started_at, ended_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(log.id.into_inner())
        .bind(log.user_id.into_inner())
        .bind(log.duration_hours)
        .bind(i16::from(log.quality))
        .bind(log.started_at)
        .bind(log.ended_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn sleep_since(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<SleepLog>> {
        let results = sqlx::query_as::<_, SleepModel>(
            r#"
            SELECT id, user_id, duration_hours, quality, started_at, ended_at
            FROM sleep_logs
            WHERE user_id = $1 AND ended_at >= $2
            ORDER BY ended_at ASC
            "#,
        )
        .bind(user_id.into_inner())
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(SleepLog::from).collect())
    }

    #[instrument(skip(self, log), fields(log_id = %log.id))]
    async fn insert_activity(&self, log: &ActivityLog) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO activity_logs (id, user_id, steps, active_minutes, calories_burned, logged_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(log.id.into_inner())
        .bind(log.user_id.into_inner())
        .bind(log.steps)
        .bind(log.active_minutes)
        .bind(log.calories_burned)
        .bind(log.logged_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn activity_since(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<ActivityLog>> {
        let results = sqlx::query_as::<_, ActivityModel>(
            r#"
            SELECT id, user_id, steps, active_minutes, calories_burned, logged_at
            FROM activity_logs
            WHERE user_id = $1 AND logged_at >= $2
            ORDER BY logged_at ASC
            "#,
        )
        .bind(user_id.into_inner())
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ActivityLog::from).collect())
    }

    #[instrument(skip(self, session), fields(session_id = %session.id))]
    async fn insert_app_session(&self, session: &AppSession) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO app_sessions (id, user_id, duration_minutes, started_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.id.into_inner())
        .bind(session.user_id.into_inner())
        .bind(session.duration_minutes)
        .bind(session.started_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn app_sessions_since(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<AppSession>> {
        let results = sqlx::query_as::<_, AppSessionModel>(
            r#"
            SELECT id, user_id, duration_minutes, started_at
            FROM app_sessions
            WHERE user_id = $1 AND started_at >= $2
            ORDER BY started_at ASC
            "#,
        )
        .bind(user_id.into_inner())
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(AppSession::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgHealthLogStore>();
    }
}
