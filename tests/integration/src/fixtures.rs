//! Gateway fixtures backed by the in-memory doubles.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use vita_common::{JwtService, SocialConfig};
use vita_core::{FileStoreRef, SnowflakeGenerator, SocialStoreRef, UserProfile};
use vita_gateway::{AuthService, GatewayContext, RegisterRequest};

use crate::doubles::{MemoryFileStore, MemoryHealthLogStore, MemoryProfileStore, MemorySocialStore};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A gateway wired to in-memory backends
pub struct TestGateway {
    pub ctx: GatewayContext,
    pub profiles: Arc<MemoryProfileStore>,
    pub health: Arc<MemoryHealthLogStore>,
    pub files: Arc<MemoryFileStore>,
}

/// Build a gateway over an ordered list of social store backends
pub fn gateway_with_stores(stores: Vec<SocialStoreRef>) -> TestGateway {
    let files = Arc::new(MemoryFileStore::new());
    gateway_with_file_stores(stores, vec![files.clone()], files)
}

/// Build a gateway with an explicit file store chain. The `files` handle is
/// the in-memory store assertions run against.
pub fn gateway_with_file_stores(
    stores: Vec<SocialStoreRef>,
    file_stores: Vec<FileStoreRef>,
    files: Arc<MemoryFileStore>,
) -> TestGateway {
    let profiles = Arc::new(MemoryProfileStore::new());
    let health = Arc::new(MemoryHealthLogStore::new());

    let mut builder = GatewayContext::builder()
        .profile_store(profiles.clone())
        .health_store(health.clone())
        .jwt_service(Arc::new(JwtService::new("test-secret-key", 900, 86400)))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
        .social_config(SocialConfig::default());
    for store in stores {
        builder = builder.social_store(store);
    }
    for store in file_stores {
        builder = builder.file_store(store);
    }

    TestGateway {
        ctx: builder.build().expect("gateway context should build"),
        profiles,
        health,
        files,
    }
}

/// Build a gateway with a single in-memory social store
pub fn gateway_with_store(store: Arc<MemorySocialStore>) -> TestGateway {
    gateway_with_stores(vec![store])
}

/// Register a user and return the profile
pub async fn register_user(ctx: &GatewayContext, display_name: &str) -> UserProfile {
    let suffix = unique_suffix();
    let service = AuthService::new(ctx);
    let response = service
        .register(RegisterRequest {
            email: format!("{display_name}{suffix}@example.com").to_lowercase(),
            password: "TestPass123".to_string(),
            display_name: display_name.to_string(),
        })
        .await
        .expect("registration should succeed");
    response.user
}
