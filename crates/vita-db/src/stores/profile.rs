//! PostgreSQL implementation of ProfileStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vita_core::entities::UserProfile;
use vita_core::traits::{ProfileStore, StoreResult};
use vita_core::{DomainError, Snowflake};

use crate::error::{map_db_error, map_unique_violation};
use crate::models::ProfileModel;

const PROFILE_COLUMNS: &str =
    "id, email, display_name, avatar_url, bio, created_at, updated_at";

/// PostgreSQL implementation of ProfileStore
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    /// Create a new PgProfileStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    #[instrument(skip(self, profile, password_hash), fields(profile_id = %profile.id))]
    async fn create_profile(&self, profile: &UserProfile, password_hash: &str) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, email, display_name, avatar_url, bio,
                                  password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(profile.id.into_inner())
        .bind(&profile.email)
        .bind(&profile.display_name)
        .bind(profile.avatar_url.as_deref())
        .bind(profile.bio.as_deref())
        .bind(password_hash)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::EmailAlreadyExists(profile.email.clone()))
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn profile(&self, id: Snowflake) -> StoreResult<UserProfile> {
        let result = sqlx::query_as::<_, ProfileModel>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(UserProfile::from)
            .ok_or_else(|| DomainError::ProfileNotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn profile_by_email(&self, email: &str) -> StoreResult<UserProfile> {
        let result = sqlx::query_as::<_, ProfileModel>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(UserProfile::from)
            .ok_or_else(|| DomainError::ProfileNotFound(email.to_string()))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM profiles WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn password_hash(&self, id: Snowflake) -> StoreResult<String> {
        let hash: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM profiles WHERE id = $1")
                .bind(id.into_inner())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        hash.ok_or_else(|| DomainError::ProfileNotFound(id.to_string()))
    }

    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    async fn update_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET display_name = $2, avatar_url = $3, bio = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(profile.id.into_inner())
        .bind(&profile.display_name)
        .bind(profile.avatar_url.as_deref())
        .bind(profile.bio.as_deref())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ProfileNotFound(profile.id.to_string()));
        }
        Ok(())
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password_hash(&self, id: Snowflake, password_hash: &str) -> StoreResult<()> {
        let result =
            sqlx::query("UPDATE profiles SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id.into_inner())
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ProfileNotFound(id.to_string()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn all_profile_ids(&self) -> StoreResult<Vec<Snowflake>> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM profiles ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }
}
