//! Shared application state for every HTTP handler.

use std::sync::Arc;

use crate::application::{
    ConvertScreenshotHandler, CreateCheckoutHandler, GetAccountHandler,
    HandleSubscriptionWebhookHandler, ListConversionsHandler, ListPublicConversionsHandler,
    ProvisionUserHandler, UploadImageHandler,
};
use crate::domain::billing::StripeWebhookVerifier;
use crate::domain::conversion::UploadPolicy;
use crate::ports::{
    CodeGenerator, ConversionRepository, ImageStorage, PaymentProvider, SessionValidator,
    UserRepository,
};

/// Billing settings the handlers need besides the provider itself.
#[derive(Clone)]
pub struct BillingSettings {
    pub pro_price_id: String,
    /// Public URL of the web app, used for checkout redirects.
    pub app_url: String,
    pub webhook_verifier: StripeWebhookVerifier,
}

/// Cloned for each request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub conversions: Arc<dyn ConversionRepository>,
    pub code_generator: Arc<dyn CodeGenerator>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub image_storage: Arc<dyn ImageStorage>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub billing: BillingSettings,
    pub upload_policy: UploadPolicy,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn convert_handler(&self) -> ConvertScreenshotHandler {
        ConvertScreenshotHandler::new(
            self.users.clone(),
            self.conversions.clone(),
            self.code_generator.clone(),
        )
    }

    pub fn list_conversions_handler(&self) -> ListConversionsHandler {
        ListConversionsHandler::new(self.conversions.clone())
    }

    pub fn list_public_conversions_handler(&self) -> ListPublicConversionsHandler {
        ListPublicConversionsHandler::new(self.conversions.clone())
    }

    pub fn upload_handler(&self) -> UploadImageHandler {
        UploadImageHandler::new(self.image_storage.clone(), self.upload_policy)
    }

    pub fn checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(
            self.payment_provider.clone(),
            self.billing.pro_price_id.clone(),
            &self.billing.app_url,
        )
    }

    pub fn webhook_handler(&self) -> HandleSubscriptionWebhookHandler {
        HandleSubscriptionWebhookHandler::new(
            self.users.clone(),
            self.billing.webhook_verifier.clone(),
        )
    }

    pub fn provision_user_handler(&self) -> ProvisionUserHandler {
        ProvisionUserHandler::new(self.users.clone())
    }

    pub fn get_account_handler(&self) -> GetAccountHandler {
        GetAccountHandler::new(self.users.clone())
    }
}
