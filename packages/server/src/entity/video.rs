use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "video")]
pub struct Model {
    /// UUIDv7 primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: Option<String>,

    /// Playable source URL.
    pub url: String,

    /// Hover-preview source URL.
    pub preview_url: Option<String>,

    /// Thumbnail image URL.
    pub thumbnail: Option<String>,

    /// Length in whole seconds, when known.
    pub duration: Option<i32>,

    #[sea_orm(default_value = 0)]
    pub views: i32,

    #[sea_orm(has_many, via = "model_video")]
    pub models: HasMany<super::model::Entity>,

    /// When the video entered the catalog. Distinct from `created_at` and
    /// the axis the default list ordering uses.
    pub uploaded_at: DateTimeUtc,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
