//! Server setup and initialization
//!
//! Wires up the storage backends, the gateway context, and the HTTP server.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use vita_analytics::AnalyticsService;
use vita_common::{AppConfig, AppError, JwtService, LocalFileStore};
use vita_core::SnowflakeGenerator;
use vita_db::{create_pool, run_migrations, PgHealthLogStore, PgProfileStore, PgSocialStore};
use vita_docstore::{DocSocialStore, EventPublisher, RedisPool, RedisPoolConfig};
use vita_gateway::GatewayContext;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(
        router,
        &state.config().cors,
        state.config().app.env.is_production(),
    );
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Database pool and migrations
    info!("Connecting to PostgreSQL...");
    let db_config = vita_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    let migrations_dir =
        std::env::var("MIGRATIONS_DIR").unwrap_or_else(|_| "crates/vita-db/migrations".to_string());
    run_migrations(&pool, Path::new(&migrations_dir))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Redis pool
    info!("Connecting to Redis...");
    let redis_config = RedisPoolConfig::from(&config.redis);
    let redis_pool = RedisPool::new(redis_config).map_err(|e| AppError::DocStore(e.to_string()))?;
    let shared_redis = Arc::new(redis_pool.clone());
    info!("Redis connection established");

    // Identity services
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Storage backends. The relational store is the primary; the document
    // store picks up operations the primary cannot serve.
    let pg_social = Arc::new(PgSocialStore::new(pool.clone()));
    let doc_social = Arc::new(DocSocialStore::new(redis_pool.clone()));
    let profile_store = Arc::new(PgProfileStore::new(pool.clone()));
    let health_store = Arc::new(PgHealthLogStore::new(pool.clone()));
    let file_store = Arc::new(LocalFileStore::new(
        &config.storage.upload_dir,
        &config.storage.public_base_url,
    ));
    let publisher = EventPublisher::new(redis_pool);

    let gateway = GatewayContext::builder()
        .social_store(pg_social)
        .social_store(doc_social)
        .profile_store(profile_store)
        .health_store(health_store.clone())
        .file_store(file_store)
        .publisher(publisher)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .social_config(config.social.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let analytics = AnalyticsService::new(health_store, config.analytics.default_days);

    Ok(AppState::new(gateway, analytics, config, pool, shared_redis))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
