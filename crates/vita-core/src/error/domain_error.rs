//! Domain-level errors shared by every store backend and service.

use thiserror::Error;

/// Errors arising from domain rules or store backends.
#[derive(Debug, Error)]
pub enum DomainError {
    // ========================================================================
    // Not found
    // ========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    #[error("Message not found: {0}")]
    MessageNotFound(String),

    #[error("Friendship not found: {0}")]
    FriendshipNotFound(String),

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Notification not found: {0}")]
    NotificationNotFound(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    // ========================================================================
    // Validation
    // ========================================================================
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    #[error("Content too long: {length} characters (max {max})")]
    ContentTooLong { length: usize, max: usize },

    // ========================================================================
    // Conflict
    // ========================================================================
    #[error("Email already registered: {0}")]
    EmailAlreadyExists(String),

    #[error("Like already exists for post {0}")]
    DuplicateLike(String),

    #[error("Friendship already exists between {0} and {1}")]
    FriendshipExists(String, String),

    // ========================================================================
    // Authorization
    // ========================================================================
    #[error("Operation not permitted: {0}")]
    Forbidden(String),

    // ========================================================================
    // Store infrastructure (recoverable by backend fallback)
    // ========================================================================
    #[error("Relation missing in store: {0}")]
    MissingRelation(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Store operation failed: {0}")]
    StoreFault(String),

    // ========================================================================
    // Internal
    // ========================================================================
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PostNotFound(_) => "POST_NOT_FOUND",
            Self::CommentNotFound(_) => "COMMENT_NOT_FOUND",
            Self::MessageNotFound(_) => "MESSAGE_NOT_FOUND",
            Self::FriendshipNotFound(_) => "FRIENDSHIP_NOT_FOUND",
            Self::GroupNotFound(_) => "GROUP_NOT_FOUND",
            Self::NotificationNotFound(_) => "NOTIFICATION_NOT_FOUND",
            Self::ProfileNotFound(_) => "PROFILE_NOT_FOUND",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::InvalidEmail(_) => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::EmailAlreadyExists(_) => "EMAIL_EXISTS",
            Self::DuplicateLike(_) => "DUPLICATE_LIKE",
            Self::FriendshipExists(_, _) => "FRIENDSHIP_EXISTS",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::MissingRelation(_) => "MISSING_RELATION",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::StoreFault(_) => "STORE_FAULT",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the error indicates a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::MessageNotFound(_)
                | Self::FriendshipNotFound(_)
                | Self::GroupNotFound(_)
                | Self::NotificationNotFound(_)
                | Self::ProfileNotFound(_)
        )
    }

    /// Whether the error is a client-side validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidEmail(_)
                | Self::WeakPassword(_)
                | Self::ContentTooLong { .. }
        )
    }

    /// Whether the error is a uniqueness or state conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists(_) | Self::DuplicateLike(_) | Self::FriendshipExists(_, _)
        )
    }

    /// Whether a fallback store may succeed where this store failed.
    ///
    /// Infrastructure faults (missing schema relations, unreachable backend,
    /// transient store failures) are recoverable. Domain outcomes such as
    /// not-found or validation failures are final and must not trigger a
    /// retry against another backend.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MissingRelation(_) | Self::StoreUnavailable(_) | Self::StoreFault(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_not_found() {
        assert!(DomainError::PostNotFound("1".into()).is_not_found());
        assert!(!DomainError::Validation("bad".into()).is_not_found());
    }

    #[test]
    fn infra_faults_are_recoverable() {
        assert!(DomainError::MissingRelation("posts".into()).is_recoverable());
        assert!(DomainError::StoreUnavailable("connection refused".into()).is_recoverable());
        assert!(DomainError::StoreFault("timeout".into()).is_recoverable());
    }

    #[test]
    fn domain_outcomes_are_final() {
        assert!(!DomainError::PostNotFound("1".into()).is_recoverable());
        assert!(!DomainError::DuplicateLike("1".into()).is_recoverable());
        assert!(!DomainError::Forbidden("nope".into()).is_recoverable());
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(DomainError::MissingRelation("x".into()).code(), "MISSING_RELATION");
        assert_eq!(
            DomainError::ContentTooLong { length: 501, max: 500 }.code(),
            "CONTENT_TOO_LONG"
        );
    }
}
