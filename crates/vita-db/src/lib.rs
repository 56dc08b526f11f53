//! # vita-db
//!
//! Primary structured store backed by PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate implements the store traits defined in `vita-core`:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - [`PgSocialStore`], [`PgHealthLogStore`], and [`PgProfileStore`]
//!
//! Infrastructure failures (missing relations, unreachable server) map to
//! recoverable domain errors so the gateway can fall through to a
//! secondary backend.

pub mod error;
pub mod mappers;
pub mod models;
pub mod pool;
pub mod stores;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use stores::{PgHealthLogStore, PgProfileStore, PgSocialStore};

/// Apply schema migrations from a directory on disk.
///
/// The macros feature of sqlx is disabled workspace-wide, so migrations are
/// loaded at runtime instead of being embedded at compile time.
pub async fn run_migrations(
    pool: &PgPool,
    dir: &std::path::Path,
) -> Result<(), sqlx::migrate::MigrateError> {
    let migrator = sqlx::migrate::Migrator::new(dir).await?;
    migrator.run(pool).await
}
