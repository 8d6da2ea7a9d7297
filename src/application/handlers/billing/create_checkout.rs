//! CreateCheckoutHandler - Starts a hosted Pro subscription checkout.

use std::sync::Arc;

use crate::domain::billing::{CheckoutError, CheckoutRequest, CheckoutUrls};
use crate::ports::{CreateCheckoutRequest, PaymentProvider};

/// Command to start a checkout. Fields arrive unvalidated from the client.
#[derive(Debug, Clone, Default)]
pub struct CreateCheckoutCommand {
    pub user_id: Option<String>,
    pub user_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCheckoutResult {
    pub session_id: String,
    /// Hosted checkout URL to redirect the user to.
    pub url: String,
}

pub struct CreateCheckoutHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    pro_price_id: String,
    urls: CheckoutUrls,
}

impl CreateCheckoutHandler {
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        pro_price_id: impl Into<String>,
        app_url: &str,
    ) -> Self {
        Self {
            payment_provider,
            pro_price_id: pro_price_id.into(),
            urls: CheckoutUrls::for_app(app_url),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CreateCheckoutResult, CheckoutError> {
        let request = CheckoutRequest::new(cmd.user_id.as_deref(), cmd.user_email.as_deref())?;

        let session = self
            .payment_provider
            .create_checkout_session(CreateCheckoutRequest {
                user_id: request.user_id.clone(),
                email: request.customer_email,
                price_id: self.pro_price_id.clone(),
                success_url: self.urls.success_url.clone(),
                cancel_url: self.urls.cancel_url.clone(),
            })
            .await
            .map_err(|e| {
                tracing::error!(user_id = %request.user_id, error = %e, "checkout session creation failed");
                CheckoutError::upstream(e.message)
            })?;

        tracing::info!(user_id = %request.user_id, session_id = %session.id, "checkout session created");
        Ok(CreateCheckoutResult {
            session_id: session.id,
            url: session.url,
        })
    }
}
