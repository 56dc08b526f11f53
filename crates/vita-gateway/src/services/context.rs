//! Gateway context - dependency container for services
//!
//! Holds the ordered backend chain, supporting stores, and shared services.
//! Backends are injected as trait objects so tests can swap in doubles and
//! the binary can wire Postgres first with the Redis document store as the
//! fallback tier.

use std::sync::Arc;

use vita_common::auth::{JwtService, PasswordService};
use vita_common::SocialConfig;
use vita_core::{
    FileStoreRef, HealthLogStoreRef, ProfileStoreRef, Snowflake, SnowflakeGenerator,
    SocialStoreRef,
};
use vita_docstore::EventPublisher;

/// Gateway context containing all dependencies
///
/// This is the main dependency container passed to every service. It provides:
/// - The ordered social backend chain (first entry is the primary store)
/// - Profile and health log stores
/// - The ordered file store chain for image uploads
/// - JWT and password services for authentication
/// - Snowflake generator for ID generation
/// - Optional Redis pub/sub publisher for event fan-out
#[derive(Clone)]
pub struct GatewayContext {
    // Ordered backend chain; index 0 is the primary
    social_stores: Vec<SocialStoreRef>,

    // Supporting stores
    profile_store: ProfileStoreRef,
    health_store: HealthLogStoreRef,

    // Ordered file store chain; uploads try each in turn
    file_stores: Vec<FileStoreRef>,

    // Pub/Sub (absent in tests and degraded deployments)
    publisher: Option<EventPublisher>,

    // Services
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    snowflake_generator: Arc<SnowflakeGenerator>,

    // Policy knobs
    social_config: SocialConfig,
}

impl GatewayContext {
    /// Start building a context
    pub fn builder() -> GatewayContextBuilder {
        GatewayContextBuilder::new()
    }

    // === Stores ===

    /// The ordered social backend chain
    pub fn social_stores(&self) -> &[SocialStoreRef] {
        &self.social_stores
    }

    /// Get the profile store
    pub fn profile_store(&self) -> &dyn vita_core::ProfileStore {
        self.profile_store.as_ref()
    }

    /// Get the health log store
    pub fn health_store(&self) -> &dyn vita_core::HealthLogStore {
        self.health_store.as_ref()
    }

    /// The ordered file store chain
    pub fn file_stores(&self) -> &[FileStoreRef] {
        &self.file_stores
    }

    // === Pub/Sub ===

    /// Get the event publisher, if one is configured
    pub fn publisher(&self) -> Option<&EventPublisher> {
        self.publisher.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Get the social policy configuration
    pub fn social_config(&self) -> &SocialConfig {
        &self.social_config
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for GatewayContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayContext")
            .field("social_stores", &self.social_stores.len())
            .field("publisher", &self.publisher.is_some())
            .field("social_config", &self.social_config)
            .finish_non_exhaustive()
    }
}

/// Builder for creating a `GatewayContext`
pub struct GatewayContextBuilder {
    social_stores: Vec<SocialStoreRef>,
    profile_store: Option<ProfileStoreRef>,
    health_store: Option<HealthLogStoreRef>,
    file_stores: Vec<FileStoreRef>,
    publisher: Option<EventPublisher>,
    jwt_service: Option<Arc<JwtService>>,
    password_service: PasswordService,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    social_config: SocialConfig,
}

impl GatewayContextBuilder {
    pub fn new() -> Self {
        Self {
            social_stores: Vec::new(),
            profile_store: None,
            health_store: None,
            file_stores: Vec::new(),
            publisher: None,
            jwt_service: None,
            password_service: PasswordService::new(),
            snowflake_generator: None,
            social_config: SocialConfig::default(),
        }
    }

    /// Append a social backend to the chain. Call order defines priority.
    pub fn social_store(mut self, store: SocialStoreRef) -> Self {
        self.social_stores.push(store);
        self
    }

    pub fn profile_store(mut self, store: ProfileStoreRef) -> Self {
        self.profile_store = Some(store);
        self
    }

    pub fn health_store(mut self, store: HealthLogStoreRef) -> Self {
        self.health_store = Some(store);
        self
    }

    /// Append a file store to the chain. Call order defines priority.
    pub fn file_store(mut self, store: FileStoreRef) -> Self {
        self.file_stores.push(store);
        self
    }

    pub fn publisher(mut self, publisher: EventPublisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn social_config(mut self, config: SocialConfig) -> Self {
        self.social_config = config;
        self
    }

    /// Build the `GatewayContext`
    ///
    /// # Errors
    /// Returns `GatewayError::Validation` if the backend chain is empty or a
    /// required dependency is missing
    pub fn build(self) -> super::error::GatewayResult<GatewayContext> {
        use super::error::GatewayError;

        if self.social_stores.is_empty() {
            return Err(GatewayError::validation(
                "at least one social store is required",
            ));
        }
        if self.file_stores.is_empty() {
            return Err(GatewayError::validation(
                "at least one file store is required",
            ));
        }

        Ok(GatewayContext {
            social_stores: self.social_stores,
            profile_store: self
                .profile_store
                .ok_or_else(|| GatewayError::validation("profile_store is required"))?,
            health_store: self
                .health_store
                .ok_or_else(|| GatewayError::validation("health_store is required"))?,
            file_stores: self.file_stores,
            publisher: self.publisher,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| GatewayError::validation("jwt_service is required"))?,
            password_service: self.password_service,
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| GatewayError::validation("snowflake_generator is required"))?,
            social_config: self.social_config,
        })
    }
}

impl Default for GatewayContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
