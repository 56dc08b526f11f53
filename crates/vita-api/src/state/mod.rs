//! Application state
//!
//! Holds the shared state for the Axum application: the gateway context,
//! the analytics service, configuration, and the raw pools used by the
//! readiness probe.

use std::sync::Arc;

use vita_analytics::AnalyticsService;
use vita_common::{AppConfig, JwtService};
use vita_db::PgPool;
use vita_docstore::SharedRedisPool;
use vita_gateway::GatewayContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<GatewayContext>,
    analytics: Arc<AnalyticsService>,
    config: Arc<AppConfig>,
    db_pool: PgPool,
    redis_pool: SharedRedisPool,
}

impl AppState {
    pub fn new(
        gateway: GatewayContext,
        analytics: AnalyticsService,
        config: AppConfig,
        db_pool: PgPool,
        redis_pool: SharedRedisPool,
    ) -> Self {
        Self {
            gateway: Arc::new(gateway),
            analytics: Arc::new(analytics),
            config: Arc::new(config),
            db_pool,
            redis_pool,
        }
    }

    /// Get the gateway context
    pub fn gateway(&self) -> &GatewayContext {
        &self.gateway
    }

    /// Get the analytics service
    pub fn analytics(&self) -> &AnalyticsService {
        &self.analytics
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.gateway.jwt_service()
    }

    /// Get the PostgreSQL pool (readiness probe only)
    pub fn db_pool(&self) -> &PgPool {
        &self.db_pool
    }

    /// Get the Redis pool (readiness probe only)
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("gateway", &"GatewayContext")
            .field("analytics", &"AnalyticsService")
            .finish_non_exhaustive()
    }
}
