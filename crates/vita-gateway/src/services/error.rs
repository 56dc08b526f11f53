//! Gateway error types
//!
//! Provides a unified error type for all gateway operations, including the
//! aggregate error produced when every storage backend fails.

use std::fmt;

use vita_common::AppError;
use vita_core::DomainError;

/// One backend's failure inside a tiered resolution attempt
#[derive(Debug)]
pub struct StoreFailure {
    /// Backend name as reported by `SocialStore::name`
    pub store: &'static str,
    /// The recoverable fault the backend returned
    pub error: DomainError,
}

impl fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.store, self.error)
    }
}

/// Gateway layer error type
#[derive(Debug)]
pub enum GatewayError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error (auth, credentials, etc.)
    App(AppError),

    /// Validation error
    Validation(String),

    /// Caller is not allowed to perform the operation
    Forbidden(String),

    /// Non-friend message cap reached
    MessageLimitReached { cap: i64 },

    /// Post image could not be stored
    ImageUploadFailed(String),

    /// Every configured backend failed for this operation
    AllStoresFailed {
        operation: &'static str,
        failures: Vec<StoreFailure>,
    },

    /// Internal error
    Internal(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            Self::MessageLimitReached { cap } => write!(
                f,
                "Message limit reached: add this user as a friend to send more than {cap} messages"
            ),
            Self::ImageUploadFailed(msg) => write!(f, "Image upload failed: {msg}"),
            Self::AllStoresFailed { operation, failures } => {
                write!(f, "All storage backends failed for {operation}: ")?;
                for (i, failure) in failures.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{failure}")?;
                }
                Ok(())
            }
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl GatewayError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else if matches!(e, DomainError::Forbidden(_)) {
                    403
                } else if e.is_recoverable() {
                    503
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
            Self::Validation(_) => 400,
            Self::Forbidden(_) | Self::MessageLimitReached { .. } => 403,
            Self::ImageUploadFailed(_) | Self::Internal(_) => 500,
            Self::AllStoresFailed { .. } => 503,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::MessageLimitReached { .. } => "MESSAGE_LIMIT_REACHED",
            Self::ImageUploadFailed(_) => "IMAGE_UPLOAD_FAILED",
            Self::AllStoresFailed { .. } => "STORES_EXHAUSTED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for GatewayError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for GatewayError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Domain(e) => AppError::Domain(e),
            GatewayError::App(e) => e,
            GatewayError::Validation(msg) => AppError::Validation(msg),
            GatewayError::Forbidden(msg) => AppError::Domain(DomainError::Forbidden(msg)),
            GatewayError::MessageLimitReached { cap } => {
                AppError::Domain(DomainError::Forbidden(format!(
                    "message limit of {cap} reached for non-friends"
                )))
            }
            GatewayError::ImageUploadFailed(msg) => AppError::FileStorage(msg),
            GatewayError::AllStoresFailed { operation, failures } => {
                let detail = failures
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                AppError::StoresExhausted(format!("{operation}: {detail}"))
            }
            GatewayError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
