//! Conversion pipeline error taxonomy.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Unauthorized | 401 |
//! | InvalidRequest | 400 |
//! | NotFound | 404 |
//! | QuotaExceeded | 403 |
//! | UpstreamFailure | 500 |
//! | PersistenceFailure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Failures of a single conversion request. Each step short-circuits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// No bearer credential was presented.
    Unauthorized,

    /// A required input field is missing or blank.
    InvalidRequest { message: String },

    /// The user record does not exist.
    NotFound(UserId),

    /// Free tier with no credits remaining.
    QuotaExceeded(UserId),

    /// The vision model failed or returned nothing.
    UpstreamFailure(String),

    /// A storage read failed.
    PersistenceFailure(String),
}

impl ConversionError {
    pub fn unauthorized() -> Self {
        ConversionError::Unauthorized
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        ConversionError::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn not_found(user_id: UserId) -> Self {
        ConversionError::NotFound(user_id)
    }

    pub fn quota_exceeded(user_id: UserId) -> Self {
        ConversionError::QuotaExceeded(user_id)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        ConversionError::UpstreamFailure(message.into())
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        ConversionError::PersistenceFailure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConversionError::Unauthorized => ErrorCode::Unauthorized,
            ConversionError::InvalidRequest { .. } => ErrorCode::InvalidRequest,
            ConversionError::NotFound(_) => ErrorCode::UserNotFound,
            ConversionError::QuotaExceeded(_) => ErrorCode::QuotaExceeded,
            ConversionError::UpstreamFailure(_) => ErrorCode::UpstreamFailure,
            ConversionError::PersistenceFailure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            ConversionError::Unauthorized => "Unauthorized - No token provided".to_string(),
            ConversionError::InvalidRequest { message } => message.clone(),
            ConversionError::NotFound(_) => "User not found".to_string(),
            ConversionError::QuotaExceeded(_) => {
                "No credits remaining. Please upgrade to Pro.".to_string()
            }
            ConversionError::UpstreamFailure(msg) => msg.clone(),
            ConversionError::PersistenceFailure(msg) => format!("Storage error: {}", msg),
        }
    }
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ConversionError {}

impl From<DomainError> for ConversionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::InvalidRequest => {
                ConversionError::InvalidRequest {
                    message: err.message,
                }
            }
            _ => ConversionError::PersistenceFailure(err.to_string()),
        }
    }
}
