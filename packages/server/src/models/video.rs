use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{model, video};
use crate::error::AppError;

use super::model::ModelSummary;
use super::shared::int_or_string;

/// Request body for creating a video.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    #[schema(example = "Clip")]
    pub title: String,
    pub description: Option<String>,
    /// Playable source URL.
    #[schema(example = "https://x/v.mp4")]
    pub url: String,
    /// Hover-preview source URL.
    pub preview_url: Option<String>,
    pub thumbnail: Option<String>,
    /// Length in seconds. The browser form posts this as a string.
    #[serde(default, deserialize_with = "int_or_string")]
    #[schema(value_type = Option<i32>, example = 95)]
    pub duration: Option<i32>,
    /// View count; defaults to 0.
    #[serde(default, deserialize_with = "int_or_string")]
    #[schema(value_type = Option<i32>, example = 0)]
    pub views: Option<i32>,
    /// Models to link on creation.
    pub model_ids: Option<Vec<Uuid>>,
}

/// Request body for fully replacing a video.
///
/// Full-replace with two deliberate exceptions: an absent `views` leaves the
/// counter unchanged, and an absent `modelIds` leaves the link set unchanged
/// (when present, the link set is replaced wholesale).
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub preview_url: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "int_or_string")]
    #[schema(value_type = Option<i32>)]
    pub duration: Option<i32>,
    #[serde(default, deserialize_with = "int_or_string")]
    #[schema(value_type = Option<i32>)]
    pub views: Option<i32>,
    pub model_ids: Option<Vec<Uuid>>,
}

/// Video without its related models, as embedded in model responses.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub preview_url: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<i32>,
    pub views: i32,
    pub uploaded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub preview_url: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<i32>,
    pub views: i32,
    /// Models linked to this video.
    pub models: Vec<ModelSummary>,
    pub uploaded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List envelope for videos: the page slice plus the filter-wide total and
/// the paging values actually applied.
#[derive(Serialize, utoipa::ToSchema)]
pub struct VideoListResponse {
    pub data: Vec<VideoResponse>,
    /// Total matching entities, independent of skip/take.
    #[schema(example = 47)]
    pub total: u64,
    pub skip: u64,
    pub take: u64,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct VideoListQuery {
    /// Offset into the filtered set. Non-numeric input falls back to 0.
    pub skip: Option<String>,
    /// Page size. Non-numeric input falls back to 10.
    pub take: Option<String>,
    /// Case-insensitive substring match on title.
    pub search: Option<String>,
    /// Only videos linked to this model id. Non-UUID input matches nothing.
    pub model_id: Option<String>,
    /// Page-scoped sort key: `recent`, `oldest`, `most-views`, `title-az`.
    /// Reorders only the returned slice, never the whole result set.
    pub sort: Option<String>,
}

impl VideoResponse {
    pub fn from_parts(v: video::Model, models: Vec<model::Model>) -> Self {
        Self {
            id: v.id,
            title: v.title,
            description: v.description,
            url: v.url,
            preview_url: v.preview_url,
            thumbnail: v.thumbnail,
            duration: v.duration,
            views: v.views,
            models: models.into_iter().map(ModelSummary::from).collect(),
            uploaded_at: v.uploaded_at,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

impl From<video::Model> for VideoSummary {
    fn from(v: video::Model) -> Self {
        Self {
            id: v.id,
            title: v.title,
            description: v.description,
            url: v.url,
            preview_url: v.preview_url,
            thumbnail: v.thumbnail,
            duration: v.duration,
            views: v.views,
            uploaded_at: v.uploaded_at,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

pub fn validate_create_video(payload: &CreateVideoRequest) -> Result<(), AppError> {
    if payload.title.trim().is_empty() || payload.url.trim().is_empty() {
        return Err(AppError::Validation("Title and URL are required".into()));
    }
    validate_counts(payload.views, payload.duration)
}

pub fn validate_update_video(payload: &UpdateVideoRequest) -> Result<(), AppError> {
    if payload.title.trim().is_empty() || payload.url.trim().is_empty() {
        return Err(AppError::Validation("Title and URL are required".into()));
    }
    validate_counts(payload.views, payload.duration)
}

fn validate_counts(views: Option<i32>, duration: Option<i32>) -> Result<(), AppError> {
    if let Some(views) = views
        && views < 0
    {
        return Err(AppError::Validation("Views must be non-negative".into()));
    }
    if let Some(duration) = duration
        && duration < 0
    {
        return Err(AppError::Validation("Duration must be non-negative".into()));
    }
    Ok(())
}
