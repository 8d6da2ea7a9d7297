//! Webhook error types for Stripe webhook handling.
//!
//! Every failure maps to an HTTP status. Stripe retries 5xx responses and
//! gives up on 4xx, so only storage failures return 5xx.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur while verifying or applying a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// No `Stripe-Signature` header on the request.
    #[error("Missing stripe-signature header")]
    MissingSignature,

    /// Signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signed timestamp is older than the tolerance window.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Signed timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Signature header or JSON payload could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Required metadata key missing from a checkout session.
    #[error("Missing {0} in metadata")]
    MissingMetadata(&'static str),

    /// Required field missing from the event object.
    #[error("Missing {0}")]
    MissingField(&'static str),

    /// Checkout completed for a user that has no record.
    #[error("User not found")]
    UserNotFound(String),

    /// Reading or writing the user store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl WebhookError {
    /// Returns true for failures that happen before the payload is trusted.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            WebhookError::MissingSignature
                | WebhookError::InvalidSignature
                | WebhookError::TimestampOutOfRange
                | WebhookError::InvalidTimestamp
        )
    }

    /// Maps the error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingSignature
            | WebhookError::InvalidSignature
            | WebhookError::TimestampOutOfRange
            | WebhookError::InvalidTimestamp
            | WebhookError::ParseError(_)
            | WebhookError::MissingMetadata(_)
            | WebhookError::MissingField(_) => StatusCode::BAD_REQUEST,

            WebhookError::UserNotFound(_) => StatusCode::NOT_FOUND,

            WebhookError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the caller.
    pub fn public_message(&self) -> String {
        match self {
            WebhookError::TimestampOutOfRange | WebhookError::InvalidTimestamp => {
                "Invalid signature".to_string()
            }
            WebhookError::Storage(_) => "Webhook processing failed".to_string(),
            other => other.to_string(),
        }
    }
}
