//! HTTP handlers for account endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::conversion::ConversionApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::{GetAccountQuery, ProvisionUserCommand};

use super::dto::{AccountResponse, SessionResponse};

/// POST /account/session - Provision on first sign-in, refresh last login after
///
/// Returns 201 when the record was created, 200 otherwise.
pub async fn start_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ConversionApiError> {
    let result = state
        .provision_user_handler()
        .handle(ProvisionUserCommand { user })
        .await?;

    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(SessionResponse {
            created: result.created,
            account: AccountResponse::from(result.record),
        }),
    ))
}

/// GET /account - The caller's plan and credits
pub async fn get_account(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ConversionApiError> {
    let record = state
        .get_account_handler()
        .handle(GetAccountQuery { user_id: user.id })
        .await?;

    Ok(Json(AccountResponse::from(record)))
}
