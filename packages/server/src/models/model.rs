use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{model, video};
use crate::error::AppError;

use super::video::VideoSummary;

/// Request body for creating or fully replacing a model.
///
/// Updates are full-replace: an optional field left out of the body is
/// cleared, not preserved.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelPayload {
    #[schema(example = "Ava Sinclair")]
    pub name: String,
    #[schema(example = "Latina")]
    pub ethnicity: Option<String>,
    /// One of: MALE, FEMALE, NON_BINARY, PREFER_NOT_TO_SAY.
    #[schema(example = "FEMALE")]
    pub gender: Option<String>,
    /// Portrait image URL.
    pub image: Option<String>,
    pub bio: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`; date-only input lands on UTC
    /// midnight. Empty string means absent.
    #[schema(example = "1995-06-15")]
    pub date_of_birth: Option<String>,
    #[schema(example = "34-26-36")]
    pub measurements: Option<String>,
}

/// Model without its related videos, as embedded in video responses.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub id: Uuid,
    pub name: String,
    pub ethnicity: Option<String>,
    pub gender: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub measurements: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelResponse {
    pub id: Uuid,
    pub name: String,
    pub ethnicity: Option<String>,
    pub gender: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub measurements: Option<String>,
    /// Videos linked to this model.
    pub videos: Vec<VideoSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List envelope for models: the page slice plus the filter-wide total and
/// the paging values actually applied.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ModelListResponse {
    pub data: Vec<ModelResponse>,
    /// Total matching entities, independent of skip/take.
    #[schema(example = 47)]
    pub total: u64,
    pub skip: u64,
    pub take: u64,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ModelListQuery {
    /// Offset into the filtered set. Non-numeric input falls back to 0.
    pub skip: Option<String>,
    /// Page size. Non-numeric input falls back to 12.
    pub take: Option<String>,
    /// Case-insensitive substring match on name.
    pub search: Option<String>,
    /// Exact-match ethnicity filter; empty means no constraint.
    pub ethnicity: Option<String>,
    /// Page-scoped sort key: `a-z`, `z-a`, `most-videos`, `least-videos`.
    /// Reorders only the returned slice, never the whole result set.
    pub sort: Option<String>,
}

impl ModelResponse {
    pub fn from_parts(m: model::Model, videos: Vec<video::Model>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            ethnicity: m.ethnicity,
            gender: m.gender,
            image: m.image,
            bio: m.bio,
            date_of_birth: m.date_of_birth,
            measurements: m.measurements,
            videos: videos.into_iter().map(VideoSummary::from).collect(),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<model::Model> for ModelSummary {
    fn from(m: model::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            ethnicity: m.ethnicity,
            gender: m.gender,
            image: m.image,
            bio: m.bio,
            date_of_birth: m.date_of_birth,
            measurements: m.measurements,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_model_payload(payload: &ModelPayload) -> Result<(), AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }
    Ok(())
}
