//! Error mapping from Redis to domain errors

use crate::pool::RedisPoolError;
use vita_core::DomainError;

/// Convert a Redis pool error to a DomainError.
///
/// Connection-level failures are recoverable (the gateway may retry against
/// another backend), protocol or serialization problems are not worth
/// retrying elsewhere but still count as store faults for this backend.
pub fn map_redis_error(e: RedisPoolError) -> DomainError {
    match e {
        RedisPoolError::CreatePool(msg) => DomainError::StoreUnavailable(msg),
        RedisPoolError::GetConnection(e) => DomainError::StoreUnavailable(e.to_string()),
        RedisPoolError::Redis(e) => {
            if e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout() {
                DomainError::StoreUnavailable(e.to_string())
            } else {
                DomainError::StoreFault(e.to_string())
            }
        }
        RedisPoolError::Serialization(e) => DomainError::Serialization(e.to_string()),
    }
}
