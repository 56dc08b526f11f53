//! Vita API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p vita-api
//! ```
//!
//! Configuration is loaded from environment variables (with .env fallback).

use tracing::{error, info};
use vita_common::{try_init_tracing, AppConfig, TracingConfig};

#[tokio::main]
async fn main() {
    // Load configuration first so tracing can match the environment
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let tracing_config = if config.app.env.is_production() {
        TracingConfig::production()
    } else {
        TracingConfig::development()
    };
    if let Err(e) = try_init_tracing(&tracing_config) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        address = %config.server.address(),
        "Starting Vita API server"
    );

    if let Err(e) = vita_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
