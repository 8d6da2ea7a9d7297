//! Stripe payment provider adapter.
//!
//! Creates hosted Checkout Sessions through the Stripe REST API using
//! form-encoded requests authenticated with the secret key. Webhooks are
//! verified in the billing domain, not here.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key);
//! let adapter = StripePaymentAdapter::new(config)?;
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
};

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    timeout: Duration,
}

impl StripeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: "https://api.stripe.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    pub fn new(config: StripeConfig) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaymentError::network(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Form parameters for a Pro subscription checkout.
    fn checkout_params(request: &CreateCheckoutRequest) -> Vec<(&'static str, String)> {
        vec![
            ("mode", "subscription".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("customer_email", request.email.clone()),
            ("line_items[0][price]", request.price_id.clone()),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", request.success_url.clone()),
            ("cancel_url", request.cancel_url.clone()),
            ("metadata[userId]", request.user_id.to_string()),
            ("subscription_data[metadata][userId]", request.user_id.to_string()),
        ]
    }

    /// Maps a non-success Stripe response to a payment error.
    fn map_error_response(status: reqwest::StatusCode, body: &str) -> PaymentError {
        let parsed = serde_json::from_str::<StripeErrorBody>(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|b| b.error.message.clone())
            .unwrap_or_else(|| format!("Stripe API error {}: {}", status, body));

        let code = match status.as_u16() {
            401 | 403 => PaymentErrorCode::AuthenticationError,
            429 => PaymentErrorCode::RateLimitExceeded,
            400..=499 => PaymentErrorCode::InvalidRequest,
            _ => PaymentErrorCode::ProviderError,
        };

        let error = PaymentError::new(code, message);
        match parsed.and_then(|b| b.error.code) {
            Some(provider_code) => error.with_provider_code(provider_code),
            None => error,
        }
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!(
            "{}/v1/checkout/sessions",
            self.config.api_base_url.trim_end_matches('/')
        );

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&Self::checkout_params(&request))
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::map_error_response(status, &error_text));
        }

        let session: StripeCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        let url = session
            .url
            .ok_or_else(|| PaymentError::provider("Checkout session has no url"))?;

        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }
}

#[derive(Debug, Deserialize)]
struct StripeCheckoutSession {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Form, Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Vec<(Vec<(String, String)>, Option<String>)>>>;

    async fn spawn_stub(status: StatusCode, body: Value) -> (String, Captured) {
        let captured: Captured = Arc::default();
        let app = Router::new()
            .route(
                "/v1/checkout/sessions",
                post(
                    move |State(captured): State<Captured>,
                          headers: HeaderMap,
                          Form(params): Form<Vec<(String, String)>>| {
                        let body = body.clone();
                        async move {
                            let auth = headers
                                .get("authorization")
                                .and_then(|v| v.to_str().ok())
                                .map(str::to_string);
                            captured.lock().unwrap().push((params, auth));
                            (status, Json(body))
                        }
                    },
                ),
            )
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), captured)
    }

    fn request() -> CreateCheckoutRequest {
        CreateCheckoutRequest {
            user_id: UserId::new("user-1").unwrap(),
            email: "user@example.com".to_string(),
            price_id: "price_pro".to_string(),
            success_url: "http://localhost:3000/dashboard?success=true".to_string(),
            cancel_url: "http://localhost:3000/dashboard?canceled=true".to_string(),
        }
    }

    fn adapter(base_url: &str) -> StripePaymentAdapter {
        StripePaymentAdapter::new(StripeConfig::new("sk_test_123").with_base_url(base_url)).unwrap()
    }

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn checkout_params_round_trip_user_id() {
        let params = StripePaymentAdapter::checkout_params(&request());
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("mode"), Some("subscription"));
        assert_eq!(get("payment_method_types[0]"), Some("card"));
        assert_eq!(get("line_items[0][price]"), Some("price_pro"));
        assert_eq!(get("line_items[0][quantity]"), Some("1"));
        assert_eq!(get("metadata[userId]"), Some("user-1"));
        assert_eq!(get("subscription_data[metadata][userId]"), Some("user-1"));
    }

    #[tokio::test]
    async fn creates_session_and_returns_url() {
        let (base, captured) = spawn_stub(
            StatusCode::OK,
            json!({"id": "cs_test_1", "url": "https://checkout.stripe.com/c/pay/cs_test_1"}),
        )
        .await;

        let session = adapter(&base).create_checkout_session(request()).await.unwrap();

        assert_eq!(session.id, "cs_test_1");
        assert_eq!(session.url, "https://checkout.stripe.com/c/pay/cs_test_1");

        let calls = captured.lock().unwrap();
        let (params, auth) = &calls[0];
        assert_eq!(param(params, "customer_email"), Some("user@example.com"));
        assert_eq!(
            param(params, "success_url"),
            Some("http://localhost:3000/dashboard?success=true")
        );
        assert!(auth.as_deref().unwrap_or_default().starts_with("Basic "));
    }

    #[tokio::test]
    async fn session_without_url_is_an_error() {
        let (base, _) = spawn_stub(StatusCode::OK, json!({"id": "cs_test_1"})).await;

        let err = adapter(&base).create_checkout_session(request()).await.unwrap_err();

        assert_eq!(err.code, PaymentErrorCode::ProviderError);
    }

    #[tokio::test]
    async fn stripe_errors_keep_message_and_code() {
        let (base, _) = spawn_stub(
            StatusCode::BAD_REQUEST,
            json!({"error": {"message": "No such price: 'price_pro'", "code": "resource_missing"}}),
        )
        .await;

        let err = adapter(&base).create_checkout_session(request()).await.unwrap_err();

        assert_eq!(err.code, PaymentErrorCode::InvalidRequest);
        assert_eq!(err.message, "No such price: 'price_pro'");
        assert_eq!(err.provider_code.as_deref(), Some("resource_missing"));
    }

    #[test]
    fn maps_auth_and_server_statuses() {
        assert_eq!(
            StripePaymentAdapter::map_error_response(reqwest::StatusCode::UNAUTHORIZED, "{}").code,
            PaymentErrorCode::AuthenticationError
        );
        assert_eq!(
            StripePaymentAdapter::map_error_response(reqwest::StatusCode::BAD_GATEWAY, "oops").code,
            PaymentErrorCode::ProviderError
        );
    }
}
