//! Vision model port: image reference in, component source out.

use async_trait::async_trait;
use thiserror::Error;

/// Generates React component code from a UI screenshot.
///
/// Implementations make a single attempt; callers do not retry.
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    /// Generate component source for the image at `image_url`.
    async fn generate(&self, image_url: &str) -> Result<String, GenerationError>;

    /// Identifier of the backing model, for logging.
    fn model_name(&self) -> &str;
}

/// Failures from the vision model.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// Rate limited by provider.
    #[error("rate limited by provider")]
    RateLimited,

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The provider rejected the request (bad image URL, too large, ...).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Provider returned a 5xx or is otherwise down.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The model returned no content.
    #[error("No code generated from model")]
    EmptyResult,
}

impl GenerationError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        GenerationError::Unavailable(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        GenerationError::Network(message.into())
    }
}
