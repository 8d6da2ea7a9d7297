//! Error response body shared by every endpoint.

use serde::{Deserialize, Serialize};

/// `{"error": <message>, "code": <CODE>}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Error code for programmatic handling.
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_error_and_code() {
        let body = serde_json::to_value(ErrorResponse::new("QUOTA_EXCEEDED", "No credits")).unwrap();
        assert_eq!(body, serde_json::json!({"error": "No credits", "code": "QUOTA_EXCEEDED"}));
    }
}
