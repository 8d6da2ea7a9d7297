//! End-to-end tests for `/convert`, history, gallery and uploads.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;

use common::{TestApp, MAX_UPLOAD, TOKEN, USER_ID};
use snap_component::adapters::ai::MockCodeGenerator;
use snap_component::domain::account::Plan;
use snap_component::ports::GenerationError;

#[tokio::test]
async fn free_user_spends_five_credits_then_hits_quota() {
    let app = TestApp::new();
    app.seed_user(Plan::Free, 5, None).await;

    for expected in [4, 3, 2, 1, 0] {
        let (status, body) = app.convert().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["creditsRemaining"], expected);
    }

    let (status, body) = app.convert().await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "QUOTA_EXCEEDED");
    assert_eq!(body["error"], "No credits remaining. Please upgrade to Pro.");

    let user = app.user().await;
    assert_eq!(user.free_credits, 0);
    assert_eq!(user.credits_used, 5);
    assert_eq!(user.total_conversions, 5);
    assert_eq!(app.generator.call_count(), 5);
    assert_eq!(app.conversions.len().await, 5);
}

#[tokio::test]
async fn pro_user_is_unlimited_and_keeps_credits() {
    let app = TestApp::new();
    app.seed_user(Plan::Pro, 0, Some("cus_1")).await;

    let (status, body) = app.convert().await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["creditsRemaining"], "unlimited");
    let user = app.user().await;
    assert_eq!(user.free_credits, 0);
    assert_eq!(user.total_conversions, 1);
}

#[tokio::test]
async fn missing_credential_is_unauthorized_before_validation() {
    let app = TestApp::new();

    let (status, body) = app.post_json("/convert", None, json!({})).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(app.generator.call_count(), 0);
}

#[tokio::test]
async fn missing_fields_are_bad_request() {
    let app = TestApp::new();
    app.seed_user(Plan::Free, 5, None).await;

    let (status, body) = app
        .post_json("/convert", Some(TOKEN), json!({ "userId": USER_ID }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing imageUrl or userId");
    assert_eq!(app.user().await.free_credits, 5);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app.convert().await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn upstream_failure_keeps_the_spent_credit() {
    let app = TestApp::with_generator(MockCodeGenerator::new().with_error(GenerationError::RateLimited));
    app.seed_user(Plan::Free, 2, None).await;

    let (status, body) = app.convert().await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "UPSTREAM_FAILURE");
    let user = app.user().await;
    assert_eq!(user.free_credits, 1);
    assert_eq!(user.total_conversions, 0);
    assert!(app.conversions.is_empty().await);
}

#[tokio::test]
async fn history_requires_a_session() {
    let app = TestApp::new();

    let (status, _) = app.get("/conversions", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/conversions", Some("forged")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn history_lists_own_conversions_newest_first() {
    let app = TestApp::with_generator(
        MockCodeGenerator::new()
            .with_response("export function First() {}")
            .with_response("export function Second() {}"),
    );
    app.seed_user(Plan::Pro, 0, Some("cus_1")).await;
    app.convert().await;
    app.convert().await;

    let (status, body) = app.get("/conversions?limit=1", Some(TOKEN)).await;

    assert_eq!(status, StatusCode::OK);
    let conversions = body["conversions"].as_array().unwrap();
    assert_eq!(conversions.len(), 1);
    assert_eq!(conversions[0]["code"], "export function Second() {}");
    assert_eq!(conversions[0]["userId"], USER_ID);
    assert_eq!(conversions[0]["isPublic"], false);
}

#[tokio::test]
async fn public_gallery_is_open_and_hides_private_conversions() {
    let app = TestApp::new();
    app.seed_user(Plan::Pro, 0, Some("cus_1")).await;
    app.convert().await;

    let (status, body) = app.get("/conversions/public", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["conversions"].as_array().unwrap().is_empty());
}

fn upload(content_type: &str, bytes: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/uploads")
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .header(header::CONTENT_TYPE, content_type)
        .header("x-file-name", "my shot.png")
        .body(Body::from(bytes))
        .unwrap()
}

#[tokio::test]
async fn upload_stores_image_under_user_prefix() {
    let app = TestApp::new();

    let (status, body) = app.send(upload("image/png", vec![0x89, b'P', b'N', b'G'])).await;

    assert_eq!(status, StatusCode::CREATED);
    let path = body["path"].as_str().unwrap();
    assert!(path.starts_with("uploads/user-1/"));
    assert!(path.ends_with("-my_shot.png"));
    assert_eq!(body["url"], format!("memory://{}", path));
    assert_eq!(app.images.len().await, 1);
}

#[tokio::test]
async fn upload_rejects_wrong_type() {
    let app = TestApp::new();

    let (status, body) = app.send(upload("text/plain", b"hello".to_vec())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
    assert!(app.images.is_empty().await);
}

#[tokio::test]
async fn upload_rejects_oversized_body() {
    let app = TestApp::new();

    let (status, body) = app.send(upload("image/png", vec![0; MAX_UPLOAD + 1])).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
    assert!(app.images.is_empty().await);
}

#[tokio::test]
async fn health_is_ok() {
    let app = TestApp::new();

    let (status, body) = app.get("/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
