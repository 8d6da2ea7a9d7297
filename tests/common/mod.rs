//! Test harness: the full router over in-memory adapters.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use snap_component::adapters::ai::MockCodeGenerator;
use snap_component::adapters::auth::MockSessionValidator;
use snap_component::adapters::http::{api_router, AppState, BillingSettings, RouterSettings};
use snap_component::adapters::memory::{InMemoryConversionRepository, InMemoryUserRepository};
use snap_component::adapters::storage::InMemoryImageStorage;
use snap_component::adapters::stripe::MockPaymentProvider;
use snap_component::domain::account::{Plan, UserRecord};
use snap_component::domain::billing::{signature_header, StripeWebhookVerifier};
use snap_component::domain::conversion::UploadPolicy;
use snap_component::domain::foundation::{Timestamp, UserId};

pub const WEBHOOK_SECRET: &str = "whsec_integration";
pub const PRO_PRICE: &str = "price_pro";
pub const APP_URL: &str = "https://app.snapcomponent.test";
pub const TOKEN: &str = "token-user-1";
pub const USER_ID: &str = "user-1";
pub const MAX_UPLOAD: usize = 1024;

pub struct TestApp {
    pub router: Router,
    pub users: InMemoryUserRepository,
    pub conversions: InMemoryConversionRepository,
    pub generator: MockCodeGenerator,
    pub payments: MockPaymentProvider,
    pub images: InMemoryImageStorage,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_generator(MockCodeGenerator::new())
    }

    pub fn with_generator(generator: MockCodeGenerator) -> Self {
        let users = InMemoryUserRepository::new();
        let conversions = InMemoryConversionRepository::new();
        let payments = MockPaymentProvider::default();
        let images = InMemoryImageStorage::new();

        let state = AppState {
            users: Arc::new(users.clone()),
            conversions: Arc::new(conversions.clone()),
            code_generator: Arc::new(generator.clone()),
            payment_provider: Arc::new(payments.clone()),
            image_storage: Arc::new(images.clone()),
            session_validator: Arc::new(MockSessionValidator::new().with_test_user(TOKEN, USER_ID)),
            billing: BillingSettings {
                pro_price_id: PRO_PRICE.to_string(),
                app_url: APP_URL.to_string(),
                webhook_verifier: StripeWebhookVerifier::new(WEBHOOK_SECRET),
            },
            upload_policy: UploadPolicy::new(MAX_UPLOAD),
        };

        Self {
            router: api_router(state, RouterSettings::default()),
            users,
            conversions,
            generator,
            payments,
            images,
        }
    }

    /// Stores a user record for `USER_ID`.
    pub async fn seed_user(&self, plan: Plan, free_credits: u32, customer_ref: Option<&str>) -> UserRecord {
        let mut record = UserRecord::new_free(user_id(), "user-1@test.example.com", Timestamp::now());
        record.plan = plan;
        record.free_credits = free_credits;
        record.payment_customer_ref = customer_ref.map(str::to_string);
        self.users.insert(record.clone()).await;
        record
    }

    pub async fn user(&self) -> UserRecord {
        self.users.get(&user_id()).await.expect("seeded user")
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn convert(&self) -> (StatusCode, Value) {
        self.post_json(
            "/convert",
            Some(TOKEN),
            serde_json::json!({ "imageUrl": "https://img.example.com/shot.png", "userId": USER_ID }),
        )
        .await
    }

    /// Delivers a signed Stripe event.
    pub async fn deliver(&self, event_type: &str, object: Value) -> (StatusCode, Value) {
        let payload = stripe_event(event_type, object);
        let signature = signature_header(WEBHOOK_SECRET, chrono::Utc::now().timestamp(), &payload).unwrap();
        self.deliver_raw(payload, Some(&signature)).await
    }

    pub async fn deliver_raw(&self, payload: Vec<u8>, signature: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/webhook")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(signature) = signature {
            builder = builder.header("stripe-signature", signature);
        }
        self.send(builder.body(Body::from(payload)).unwrap()).await
    }
}

pub fn user_id() -> UserId {
    UserId::new(USER_ID).unwrap()
}

pub fn stripe_event(event_type: &str, object: Value) -> Vec<u8> {
    serde_json::json!({
        "id": "evt_test",
        "type": event_type,
        "created": 1_700_000_000,
        "livemode": false,
        "data": { "object": object }
    })
    .to_string()
    .into_bytes()
}
