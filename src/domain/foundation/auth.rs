//! The signed-in caller, as seen by the domain.
//!
//! Populated by a `SessionValidator` adapter from verified token claims.

use super::UserId;
use thiserror::Error;

/// Identity taken from a verified session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Subject of the token; doubles as the user record key.
    pub id: UserId,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub email_verified: bool,
}

impl AuthenticatedUser {
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        display_name: Option<String>,
        email_verified: bool,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
            photo_url: None,
            email_verified,
        }
    }

    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }
}

/// Why a bearer token was not accepted.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Malformed, wrongly signed, or issued for someone else.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// The validator could not reach a verdict.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}
