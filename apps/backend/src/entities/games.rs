use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_name = "total_score", column_type = "SmallInteger")]
    pub total_score: i16,
    #[sea_orm(column_name = "current_frame", column_type = "SmallInteger")]
    pub current_frame: i16,
    #[sea_orm(column_name = "is_complete")]
    pub is_complete: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "completed_at")]
    pub completed_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::frames::Entity")]
    Frames,
    #[sea_orm(has_many = "super::high_scores::Entity")]
    HighScores,
}

impl Related<super::frames::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Frames.def()
    }
}

impl Related<super::high_scores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HighScores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
