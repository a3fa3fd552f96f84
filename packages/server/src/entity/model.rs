use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "model")]
pub struct Model {
    /// UUIDv7 primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    pub ethnicity: Option<String>,

    /// One of: MALE, FEMALE, NON_BINARY, PREFER_NOT_TO_SAY.
    pub gender: Option<String>,

    /// Portrait image URL.
    pub image: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub bio: Option<String>,

    /// Date-only input is stored as UTC midnight.
    pub date_of_birth: Option<DateTimeUtc>,

    pub measurements: Option<String>,

    #[sea_orm(has_many, via = "model_video")]
    pub videos: HasMany<super::video::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
