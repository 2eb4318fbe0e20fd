//! SeaORM adapter for the leaderboard.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, DbErr, EntityTrait, NotSet,
    QueryFilter, QueryOrder, QuerySelect, Set, Statement,
};

use crate::entities::high_scores;

pub mod dto;

pub use dto::HighScoreCreate;

/// Advisory lock key for board updates.
const BOARD_LOCK_KEY: i64 = 0x626f_776c_0001;

/// Serialize board updates until the surrounding transaction ends.
///
/// Postgres takes a transaction-scoped advisory lock. SQLite already allows a
/// single writer, so nothing is issued there.
pub async fn lock_board<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<(), DbErr> {
    if conn.get_database_backend() != DatabaseBackend::Postgres {
        return Ok(());
    }

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        "SELECT pg_advisory_xact_lock($1)",
        vec![BOARD_LOCK_KEY.into()],
    );
    conn.execute(stmt).await?;
    Ok(())
}

/// Best entries first: score desc, earliest achievement, lowest id.
pub async fn find_top<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<high_scores::Model>, DbErr> {
    high_scores::Entity::find()
        .order_by_desc(high_scores::Column::Score)
        .order_by_asc(high_scores::Column::AchievedAt)
        .order_by_asc(high_scores::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<high_scores::Model>, DbErr> {
    high_scores::Entity::find()
        .order_by_desc(high_scores::Column::Score)
        .order_by_asc(high_scores::Column::AchievedAt)
        .order_by_asc(high_scores::Column::Id)
        .all(conn)
        .await
}

pub async fn create_high_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: HighScoreCreate,
) -> Result<high_scores::Model, DbErr> {
    let entry = high_scores::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        name: Set(dto.name),
        score: Set(dto.score),
        achieved_at: Set(dto.achieved_at),
    };

    entry.insert(conn).await
}

pub async fn delete_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<u64, DbErr> {
    if ids.is_empty() {
        return Ok(0);
    }
    let result = high_scores::Entity::delete_many()
        .filter(high_scores::Column::Id.is_in(ids.iter().copied()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
