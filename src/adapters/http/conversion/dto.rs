//! Data Transfer Objects for conversion endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::account::CreditsRemaining;
use crate::domain::conversion::ConversionRecord;

/// Body of `POST /convert`. Fields are optional so the handler decides
/// what "missing" means.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub success: bool,
    pub code: String,
    pub credits_remaining: CreditsRemaining,
}

/// `?limit=N` for list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResponse {
    pub id: String,
    pub user_id: String,
    pub image_url: String,
    pub code: String,
    pub is_public: bool,
    pub created_at: String,
}

impl From<ConversionRecord> for ConversionResponse {
    fn from(record: ConversionRecord) -> Self {
        Self {
            id: record.id.to_string(),
            user_id: record.user_id.to_string(),
            image_url: record.image_url,
            code: record.generated_code,
            is_public: record.is_public,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionListResponse {
    pub conversions: Vec<ConversionResponse>,
}

impl From<Vec<ConversionRecord>> for ConversionListResponse {
    fn from(records: Vec<ConversionRecord>) -> Self {
        Self {
            conversions: records.into_iter().map(ConversionResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
    pub path: String,
}
