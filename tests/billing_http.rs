//! End-to-end tests for checkout and the Stripe webhook.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{stripe_event, TestApp, APP_URL, PRO_PRICE, USER_ID, WEBHOOK_SECRET};
use snap_component::domain::account::{Plan, FREE_TIER_CREDITS};
use snap_component::domain::billing::signature_header;
use snap_component::ports::{PaymentError, PaymentErrorCode};

fn checkout_session(customer: &str) -> serde_json::Value {
    json!({
        "id": "cs_1",
        "customer": customer,
        "subscription": "sub_1",
        "metadata": { "userId": USER_ID }
    })
}

#[tokio::test]
async fn checkout_returns_hosted_url() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/checkout",
            None,
            json!({ "userId": USER_ID, "userEmail": "user-1@test.example.com" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["url"].as_str().unwrap().starts_with("https://checkout.stripe.com/"));

    let requests = app.payments.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].price_id, PRO_PRICE);
    assert_eq!(requests[0].email, "user-1@test.example.com");
    assert_eq!(requests[0].user_id.as_str(), USER_ID);
    assert_eq!(requests[0].success_url, format!("{}/dashboard?success=true", APP_URL));
    assert_eq!(requests[0].cancel_url, format!("{}/dashboard?canceled=true", APP_URL));
}

#[tokio::test]
async fn checkout_without_email_is_bad_request() {
    let app = TestApp::new();

    let (status, body) = app.post_json("/checkout", None, json!({ "userId": USER_ID })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
    assert_eq!(app.payments.call_count(), 0);
}

#[tokio::test]
async fn checkout_provider_failure_is_server_error() {
    let app = TestApp::new();
    app.payments.set_error(PaymentError::new(
        PaymentErrorCode::InvalidRequest,
        "No such price: 'price_pro'",
    ));

    let (status, body) = app
        .post_json(
            "/checkout",
            None,
            json!({ "userId": USER_ID, "userEmail": "user-1@test.example.com" }),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "PAYMENT_FAILED");
    assert_eq!(body["error"], "No such price: 'price_pro'");
}

#[tokio::test]
async fn missing_signature_is_rejected_without_changes() {
    let app = TestApp::new();
    app.seed_user(Plan::Free, 3, None).await;
    let payload = stripe_event("checkout.session.completed", checkout_session("cus_1"));

    let (status, body) = app.deliver_raw(payload, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SIGNATURE");
    assert_eq!(app.user().await.plan, Plan::Free);
}

#[tokio::test]
async fn forged_signature_is_rejected_without_changes() {
    let app = TestApp::new();
    app.seed_user(Plan::Free, 3, None).await;
    let payload = stripe_event("checkout.session.completed", checkout_session("cus_1"));
    let forged = signature_header("whsec_wrong", chrono::Utc::now().timestamp(), &payload).unwrap();

    let (status, body) = app.deliver_raw(payload, Some(&forged)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid signature");
    let user = app.user().await;
    assert_eq!(user.plan, Plan::Free);
    assert!(user.payment_customer_ref.is_none());
}

#[tokio::test]
async fn stale_signature_is_rejected() {
    let app = TestApp::new();
    app.seed_user(Plan::Free, 3, None).await;
    let payload = stripe_event("checkout.session.completed", checkout_session("cus_1"));
    let stale = signature_header(
        WEBHOOK_SECRET,
        chrono::Utc::now().timestamp() - 3_600,
        &payload,
    )
    .unwrap();

    let (status, _) = app.deliver_raw(payload, Some(&stale)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.user().await.plan, Plan::Free);
}

#[tokio::test]
async fn subscription_lifecycle_upgrades_then_resets() {
    let app = TestApp::new();
    app.seed_user(Plan::Free, 2, None).await;

    let (status, body) = app
        .deliver("checkout.session.completed", checkout_session("cus_1"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "received": true, "eventType": "checkout.session.completed" }));
    let user = app.user().await;
    assert_eq!(user.plan, Plan::Pro);
    assert_eq!(user.payment_customer_ref.as_deref(), Some("cus_1"));

    let (status, _) = app
        .deliver(
            "customer.subscription.created",
            json!({ "id": "sub_2", "customer": "cus_1", "status": "active" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.user().await.payment_subscription_ref.as_deref(), Some("sub_2"));

    let (status, _) = app.convert().await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .deliver(
            "customer.subscription.deleted",
            json!({ "id": "sub_2", "customer": "cus_1", "status": "canceled" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let user = app.user().await;
    assert_eq!(user.plan, Plan::Free);
    assert_eq!(user.free_credits, FREE_TIER_CREDITS);
    assert!(user.payment_subscription_ref.is_none());
    assert_eq!(user.payment_customer_ref.as_deref(), Some("cus_1"));
}

#[tokio::test]
async fn checkout_for_unknown_user_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app
        .deliver("checkout.session.completed", checkout_session("cus_1"))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["eventType"], "checkout.session.completed");
}

#[tokio::test]
async fn checkout_without_user_metadata_is_bad_request() {
    let app = TestApp::new();

    let (status, body) = app
        .deliver(
            "checkout.session.completed",
            json!({ "id": "cs_1", "customer": "cus_1", "metadata": {} }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing userId in metadata");
}

#[tokio::test]
async fn storage_failure_asks_stripe_to_retry() {
    let app = TestApp::new();
    app.seed_user(Plan::Free, 2, None).await;
    app.users.fail_writes(true).await;

    let (status, body) = app
        .deliver("checkout.session.completed", checkout_session("cus_1"))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["eventType"], "checkout.session.completed");
    assert_eq!(body["error"], "Webhook processing failed");
}

#[tokio::test]
async fn subscription_storage_failure_is_acknowledged() {
    let app = TestApp::new();
    app.seed_user(Plan::Pro, 0, Some("cus_1")).await;
    app.users.fail_writes(true).await;

    let (status, body) = app
        .deliver(
            "customer.subscription.updated",
            json!({ "id": "sub_2", "customer": "cus_1", "status": "active" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["received"], true);
    assert_eq!(body["eventType"], "customer.subscription.updated");
    assert!(app.user().await.payment_subscription_ref.is_none());
}

#[tokio::test]
async fn subscription_without_customer_is_acknowledged() {
    let app = TestApp::new();
    app.seed_user(Plan::Pro, 0, Some("cus_1")).await;

    let (status, body) = app
        .deliver(
            "customer.subscription.deleted",
            json!({ "id": "sub_2", "status": "canceled" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["eventType"], "customer.subscription.deleted");
    assert_eq!(app.user().await.plan, Plan::Pro);
}

#[tokio::test]
async fn unmatched_customer_and_unhandled_events_are_acknowledged() {
    let app = TestApp::new();

    let (status, _) = app
        .deliver(
            "customer.subscription.updated",
            json!({ "id": "sub_9", "customer": "cus_unknown", "status": "active" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .deliver("invoice.payment_failed", json!({ "id": "in_1", "customer": "cus_unknown" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["eventType"], "invoice.payment_failed");
}
