//! Error mapping from SQLx to domain errors
//!
//! Classification matters here: the gateway only falls through to the
//! secondary backend for recoverable infrastructure faults, so a missing
//! relation (SQLSTATE 42P01) or an unreachable server must not be lumped
//! in with domain outcomes like not-found.

use sqlx::Error as SqlxError;
use vita_core::DomainError;

/// SQLSTATE for "relation does not exist"
const UNDEFINED_TABLE: &str = "42P01";

/// Convert a SQLx error to a DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    match &e {
        SqlxError::Database(db_err) => {
            if db_err.code().as_deref() == Some(UNDEFINED_TABLE) {
                return DomainError::MissingRelation(db_err.message().to_string());
            }
            DomainError::StoreFault(db_err.message().to_string())
        }
        SqlxError::PoolTimedOut
        | SqlxError::PoolClosed
        | SqlxError::Io(_)
        | SqlxError::Tls(_) => DomainError::StoreUnavailable(e.to_string()),
        _ => DomainError::StoreFault(e.to_string()),
    }
}

/// Map a unique violation to a specific conflict error, anything else to
/// the standard mapping.
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_are_recoverable() {
        assert!(map_db_error(SqlxError::PoolTimedOut).is_recoverable());
        assert!(map_db_error(SqlxError::PoolClosed).is_recoverable());
    }

    #[test]
    fn row_not_found_is_a_fault_not_a_domain_miss() {
        // Stores use fetch_optional and map missing rows themselves, so a
        // raw RowNotFound reaching this mapper is an infrastructure fault.
        let err = map_db_error(SqlxError::RowNotFound);
        assert!(matches!(err, DomainError::StoreFault(_)));
    }
}
