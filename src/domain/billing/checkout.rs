//! Checkout session initiation rules.

use crate::domain::foundation::{ErrorCode, UserId};

/// Default public URL of the web app.
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";

/// Validated input for starting a Pro checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub user_id: UserId,
    pub customer_email: String,
}

impl CheckoutRequest {
    /// Both fields must be present and non-blank.
    pub fn new(user_id: Option<&str>, customer_email: Option<&str>) -> Result<Self, CheckoutError> {
        let missing = || CheckoutError::invalid_request("Missing userId or userEmail");

        let user_id = user_id
            .and_then(|id| UserId::new(id).ok())
            .ok_or_else(missing)?;
        let customer_email = customer_email
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or_else(missing)?;

        Ok(Self {
            user_id,
            customer_email: customer_email.to_string(),
        })
    }
}

/// Redirect targets after the hosted checkout finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutUrls {
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutUrls {
    pub fn for_app(app_url: &str) -> Self {
        let base = app_url.trim_end_matches('/');
        Self {
            success_url: format!("{}/dashboard?success=true", base),
            cancel_url: format!("{}/dashboard?canceled=true", base),
        }
    }
}

/// Checkout initiation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    InvalidRequest(String),
    /// The payment processor rejected or failed the request.
    UpstreamFailure(String),
}

impl CheckoutError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        CheckoutError::InvalidRequest(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        CheckoutError::UpstreamFailure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CheckoutError::InvalidRequest(_) => ErrorCode::InvalidRequest,
            CheckoutError::UpstreamFailure(_) => ErrorCode::PaymentFailed,
        }
    }

    pub fn message(&self) -> String {
        match self {
            CheckoutError::InvalidRequest(msg) | CheckoutError::UpstreamFailure(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CheckoutError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_requires_both_fields() {
        assert!(CheckoutRequest::new(Some("user-1"), None).is_err());
        assert!(CheckoutRequest::new(None, Some("a@b.c")).is_err());
        assert!(CheckoutRequest::new(Some(""), Some("a@b.c")).is_err());
        assert!(CheckoutRequest::new(Some("user-1"), Some("  ")).is_err());
    }

    #[test]
    fn request_accepts_valid_fields() {
        let request = CheckoutRequest::new(Some("user-1"), Some("a@b.c")).unwrap();
        assert_eq!(request.user_id.as_str(), "user-1");
        assert_eq!(request.customer_email, "a@b.c");
    }

    #[test]
    fn missing_fields_are_invalid_requests() {
        let err = CheckoutRequest::new(None, None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Missing userId or userEmail");
    }

    #[test]
    fn urls_point_at_dashboard() {
        let urls = CheckoutUrls::for_app(DEFAULT_APP_URL);
        assert_eq!(urls.success_url, "http://localhost:3000/dashboard?success=true");
        assert_eq!(urls.cancel_url, "http://localhost:3000/dashboard?canceled=true");
    }

    #[test]
    fn urls_tolerate_trailing_slash() {
        let urls = CheckoutUrls::for_app("https://snap.example.com/");
        assert_eq!(urls.success_url, "https://snap.example.com/dashboard?success=true");
    }
}
