//! Configuration loading

mod app_config;

pub use app_config::{
    AnalyticsConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, RedisConfig, ServerConfig, SnowflakeConfig, SocialConfig, StorageConfig,
};
