//! HTTP handlers for conversion endpoints.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, JsonRejection};
use axum::extract::{Json, Query, State};
use axum::http::{header::CONTENT_LENGTH, header::CONTENT_TYPE, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::{BearerCredential, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::{
    ConvertScreenshotCommand, ListConversionsQuery, ListPublicConversionsQuery,
    UploadImageCommand,
};
use crate::domain::conversion::{ConversionError, UploadError};

use super::dto::{
    ConversionListResponse, ConvertRequest, ConvertResponse, ListQuery, UploadResponse,
};

/// Header carrying the client's original file name for uploads.
pub const FILE_NAME_HEADER: &str = "x-file-name";

/// POST /convert - Screenshot to component code
///
/// The body is read leniently: an unreadable body counts as missing fields,
/// so a request without a credential is still answered with 401.
pub async fn convert(
    State(state): State<AppState>,
    BearerCredential(credential): BearerCredential,
    body: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ConversionApiError> {
    let request = body.map(|Json(req)| req).unwrap_or_default();

    let result = state
        .convert_handler()
        .handle(ConvertScreenshotCommand {
            credential,
            image_url: request.image_url,
            user_id: request.user_id,
        })
        .await?;

    Ok(Json(ConvertResponse {
        success: true,
        code: result.code,
        credits_remaining: result.credits_remaining,
    }))
}

/// GET /conversions - The caller's conversions, newest first
pub async fn list_conversions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConversionApiError> {
    let records = state
        .list_conversions_handler()
        .handle(ListConversionsQuery {
            user_id: user.id,
            limit: query.limit,
        })
        .await?;

    Ok(Json(ConversionListResponse::from(records)))
}

/// GET /conversions/public - Public gallery, newest first
pub async fn list_public_conversions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ConversionApiError> {
    let records = state
        .list_public_conversions_handler()
        .handle(ListPublicConversionsQuery { limit: query.limit })
        .await?;

    Ok(Json(ConversionListResponse::from(records)))
}

/// POST /uploads - Raw image body, `Content-Type` and optional `X-File-Name`
pub async fn upload_image(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, UploadApiError> {
    let max = state.upload_policy.max_bytes();
    let bytes = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            let size = header_str(&headers, CONTENT_LENGTH.as_str())
                .and_then(|len| len.parse().ok())
                .unwrap_or(max + 1);
            UploadError::TooLarge { size, max }
        } else {
            UploadError::Storage(rejection.body_text())
        }
    })?;

    let result = state
        .upload_handler()
        .handle(UploadImageCommand {
            user_id: user.id,
            content_type: header_str(&headers, CONTENT_TYPE.as_str())
                .unwrap_or_default()
                .to_string(),
            file_name: header_str(&headers, FILE_NAME_HEADER).map(str::to_string),
            bytes: bytes.to_vec(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            url: result.url,
            path: result.path,
        }),
    ))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts pipeline errors to HTTP responses.
#[derive(Debug)]
pub struct ConversionApiError(pub ConversionError);

impl From<ConversionError> for ConversionApiError {
    fn from(err: ConversionError) -> Self {
        Self(err)
    }
}

impl ConversionApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ConversionError::Unauthorized => StatusCode::UNAUTHORIZED,
            ConversionError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            ConversionError::NotFound(_) => StatusCode::NOT_FOUND,
            ConversionError::QuotaExceeded(_) => StatusCode::FORBIDDEN,
            ConversionError::UpstreamFailure(_) | ConversionError::PersistenceFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ConversionApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "conversion request failed");
        }
        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}

/// API error type for uploads.
#[derive(Debug)]
pub struct UploadApiError(pub UploadError);

impl From<UploadError> for UploadApiError {
    fn from(err: UploadError) -> Self {
        Self(err)
    }
}

impl IntoResponse for UploadApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            UploadError::InvalidType(_) | UploadError::Empty => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST")
            }
            UploadError::TooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            UploadError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_FAILED"),
        };
        (status, Json(ErrorResponse::new(code, self.0.to_string()))).into_response()
    }
}
