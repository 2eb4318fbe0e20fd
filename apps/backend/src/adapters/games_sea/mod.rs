//! SeaORM adapter for games.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, QueryFilter,
    Set, UpdateMany,
};
use time::OffsetDateTime;

use crate::entities::games;
use crate::infra::db_errors::{game_not_found_err, optimistic_lock_err};

pub mod dto;

pub use dto::{GameCreate, GameProgress};

/// Run a lock-guarded update, bumping `lock_version` and `updated_at`, then refetch.
///
/// Zero affected rows means either the game is gone (`GAME_NOT_FOUND`) or
/// someone else moved the version on (`OPTIMISTIC_LOCK`).
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    expected_lock_version: i32,
    configure_update: F,
) -> Result<games::Model, DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(UpdateMany<games::Entity>) -> UpdateMany<games::Entity>,
{
    let now = OffsetDateTime::now_utc();

    let result = configure_update(games::Entity::update_many())
        .col_expr(games::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            games::Column::LockVersion,
            Expr::col(games::Column::LockVersion).add(1),
        )
        .filter(games::Column::Id.eq(id))
        .filter(games::Column::LockVersion.eq(expected_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, id).await? {
            Some(game) => Err(optimistic_lock_err(expected_lock_version, game.lock_version)),
            None => Err(game_not_found_err(id)),
        };
    }

    require_game(conn, id).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Like [`find_by_id`] but a missing game is an error.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| game_not_found_err(game_id))
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, DbErr> {
    let now = OffsetDateTime::now_utc();
    let game = games::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        total_score: Set(0),
        current_frame: Set(0),
        is_complete: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        completed_at: Set(None),
        lock_version: Set(1),
    };

    game.insert(conn).await
}

pub async fn update_progress<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameProgress,
) -> Result<games::Model, DbErr> {
    optimistic_update_then_fetch(conn, dto.id, dto.expected_lock_version, |update| {
        update
            .col_expr(games::Column::TotalScore, Expr::val(dto.total_score).into())
            .col_expr(games::Column::CurrentFrame, Expr::val(dto.current_frame).into())
            .col_expr(games::Column::IsComplete, Expr::val(dto.is_complete).into())
            .col_expr(games::Column::CompletedAt, Expr::val(dto.completed_at).into())
    })
    .await
}
