//! HTTP handlers for billing endpoints.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::state::AppState;
use crate::application::{
    CreateCheckoutCommand, HandleSubscriptionWebhookCommand, WebhookFailure,
};
use crate::domain::billing::{CheckoutError, WebhookError};

use super::dto::{CheckoutRequest, CheckoutResponse, WebhookAck, WebhookErrorResponse};

/// Header Stripe signs webhook deliveries with.
pub const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

/// POST /checkout - Start a Pro subscription checkout
pub async fn create_checkout(
    State(state): State<AppState>,
    body: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let request = body.map(|Json(req)| req).unwrap_or_default();

    let result = state
        .checkout_handler()
        .handle(CreateCheckoutCommand {
            user_id: request.user_id,
            user_email: request.user_email,
        })
        .await?;

    Ok(Json(CheckoutResponse { url: result.url }))
}

/// POST /webhook - Subscription lifecycle events
///
/// The raw body is needed for signature verification, so it is taken as
/// bytes rather than JSON.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let result = state
        .webhook_handler()
        .handle(HandleSubscriptionWebhookCommand {
            payload: body.to_vec(),
            signature,
        })
        .await?;

    tracing::debug!(
        event_id = %result.event_id,
        event_type = %result.event_type,
        outcome = ?result.outcome,
        "webhook processed"
    );

    Ok(Json(WebhookAck {
        received: true,
        event_type: result.event_type,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct CheckoutApiError(pub CheckoutError);

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CheckoutError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CheckoutError::UpstreamFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}

#[derive(Debug)]
pub struct WebhookApiError(pub WebhookFailure);

impl From<WebhookFailure> for WebhookApiError {
    fn from(failure: WebhookFailure) -> Self {
        Self(failure)
    }
}

fn webhook_error_code(error: &WebhookError) -> &'static str {
    match error {
        e if e.is_verification_failure() => "INVALID_SIGNATURE",
        WebhookError::UserNotFound(_) => "USER_NOT_FOUND",
        WebhookError::Storage(_) => "DATABASE_ERROR",
        _ => "INVALID_REQUEST",
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let WebhookFailure { error, event_type } = self.0;
        let body = WebhookErrorResponse {
            error: error.public_message(),
            code: webhook_error_code(&error).to_string(),
            event_type,
        };
        (error.status_code(), Json(body)).into_response()
    }
}
