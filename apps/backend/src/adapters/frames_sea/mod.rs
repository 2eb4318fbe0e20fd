//! SeaORM adapter for frames.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::frames;

pub mod dto;

pub use dto::{FrameCreate, FrameScoreUpdate};

/// Frames of a game in index order.
pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<frames::Model>, DbErr> {
    frames::Entity::find()
        .filter(frames::Column::GameId.eq(game_id))
        .order_by_asc(frames::Column::FrameIndex)
        .all(conn)
        .await
}

/// Insert a frame; a second insert for the same (game, index) fails on the unique index.
pub async fn create_frame<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: FrameCreate,
) -> Result<frames::Model, DbErr> {
    let now = OffsetDateTime::now_utc();
    let frame = frames::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        frame_index: Set(dto.frame_index),
        roll1: Set(dto.roll1),
        roll2: Set(dto.roll2),
        roll3: Set(dto.roll3),
        score: Set(dto.score),
        created_at: Set(now),
        updated_at: Set(now),
    };

    frame.insert(conn).await
}

/// Write recalculated scores. Returns how many rows changed.
pub async fn update_scores<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    updates: &[FrameScoreUpdate],
) -> Result<u64, DbErr> {
    let now = OffsetDateTime::now_utc();
    let mut changed = 0;

    for update in updates {
        let result = frames::Entity::update_many()
            .col_expr(frames::Column::Score, Expr::val(update.score).into())
            .col_expr(frames::Column::UpdatedAt, Expr::val(now).into())
            .filter(frames::Column::Id.eq(update.id))
            .exec(conn)
            .await?;
        changed += result.rows_affected;
    }

    Ok(changed)
}
