//! Mock code generator for testing.
//!
//! Returns queued responses in order and falls back to a canned component
//! when the queue is empty. Every call is recorded so tests can assert that
//! the vision model was (or was not) reached.
//!
//! # Example
//!
//! ```ignore
//! let generator = MockCodeGenerator::new()
//!     .with_response("export function Hero() {}")
//!     .with_error(GenerationError::RateLimited);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{CodeGenerator, GenerationError};

const CANNED_COMPONENT: &str = "{/* Generated with SnapComponent - snapcomponent.com */}
export function GeneratedComponent() {
  return <div className=\"p-4\">Generated</div>;
}";

#[derive(Debug, Clone, Default)]
pub struct MockCodeGenerator {
    responses: Arc<Mutex<VecDeque<Result<String, GenerationError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockCodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, code: impl Into<String>) -> Self {
        lock(&self.responses).push_back(Ok(code.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: GenerationError) -> Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Image URLs passed to `generate`, in call order.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl CodeGenerator for MockCodeGenerator {
    async fn generate(&self, image_url: &str) -> Result<String, GenerationError> {
        lock(&self.calls).push(image_url.to_string());
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Ok(CANNED_COMPONENT.to_string()))
    }

    fn model_name(&self) -> &str {
        "mock-vision"
    }
}
