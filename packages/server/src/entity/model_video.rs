use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join table for the Model <-> Video many-to-many relation.
/// Carries no attributes beyond the two keys.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "model_video")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub model_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub video_id: Uuid,
    #[sea_orm(belongs_to, from = "model_id", to = "id")]
    pub model: Option<super::model::Entity>,
    #[sea_orm(belongs_to, from = "video_id", to = "id")]
    pub video: Option<super::video::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
