//! Mock payment provider for testing.
//!
//! Records every checkout request and answers with a canned hosted URL
//! unless an error has been injected.
//!
//! # Example
//!
//! ```ignore
//! let mock = MockPaymentProvider::new();
//! mock.set_error(PaymentError::network("connection reset"));
//!
//! let result = mock.create_checkout_session(request).await;
//! assert!(result.is_err());
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::ports::{CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentProvider};

/// Mock payment provider for testing.
#[derive(Clone, Default)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Error to return on every call until cleared.
    error: Option<PaymentError>,

    /// Requests received, in call order.
    requests: Vec<CreateCheckoutRequest>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every subsequent call fail with `error`.
    pub fn set_error(&self, error: PaymentError) {
        self.state().error = Some(error);
    }

    pub fn clear_error(&self) {
        self.state().error = None;
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<CreateCheckoutRequest> {
        self.state().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state().requests.len()
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let mut state = self.state();
        state.requests.push(request);

        if let Some(error) = state.error.clone() {
            return Err(error);
        }

        let id = format!("cs_mock_{}", state.requests.len());
        Ok(CheckoutSession {
            url: format!("https://checkout.stripe.com/c/pay/{}", id),
            id,
        })
    }
}
