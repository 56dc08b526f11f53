//! # vita-docstore
//!
//! Secondary store backed by Redis. Entities live as JSON documents with
//! sorted-set indexes, counters are adjusted atomically server-side, and
//! social events fan out over Pub/Sub.
//!
//! The [`DocSocialStore`] implements the same `SocialStore` trait as the
//! relational backend, so the gateway can use it as a degraded-mode
//! fallback when the primary store is unavailable.

pub mod error;
pub mod keys;
pub mod pool;
pub mod pubsub;
pub mod store;

// Re-export commonly used types
pub use pool::{create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, SharedRedisPool};
pub use pubsub::{EventPublisher, SocialEvent};
pub use store::DocSocialStore;
