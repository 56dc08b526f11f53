//! # vita-common
//!
//! Shared utilities including configuration, error handling, authentication,
//! telemetry, and local file storage.

pub mod auth;
pub mod config;
pub mod error;
pub mod storage;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, validate_password_strength, verify_password, Claims, JwtService,
    PasswordService, TokenPair, TokenType,
};
pub use config::{
    AnalyticsConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, RedisConfig, ServerConfig, SnowflakeConfig, SocialConfig, StorageConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use storage::LocalFileStore;
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
