use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Games {
    Table,
    Id,
    Name,
    TotalScore,
    CurrentFrame,
    IsComplete,
    CreatedAt,
    UpdatedAt,
    CompletedAt,
    LockVersion,
}

#[derive(Iden)]
enum Frames {
    Table,
    Id,
    GameId,
    FrameIndex,
    Roll1,
    Roll2,
    Roll3,
    Score,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum HighScores {
    Table,
    Id,
    GameId,
    Name,
    Score,
    AchievedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Games::Name).string().not_null())
                    .col(
                        ColumnDef::new(Games::TotalScore)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Games::CurrentFrame)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Games::IsComplete)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Games::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .check(Expr::col(Games::CurrentFrame).between(0, 10))
                    .to_owned(),
            )
            .await?;

        // frames
        manager
            .create_table(
                Table::create()
                    .table(Frames::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Frames::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Frames::GameId).big_integer().not_null())
                    .col(ColumnDef::new(Frames::FrameIndex).small_integer().not_null())
                    .col(ColumnDef::new(Frames::Roll1).small_integer().not_null())
                    .col(ColumnDef::new(Frames::Roll2).small_integer().null())
                    .col(ColumnDef::new(Frames::Roll3).small_integer().null())
                    .col(ColumnDef::new(Frames::Score).small_integer().null())
                    .col(
                        ColumnDef::new(Frames::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Frames::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .check(Expr::col(Frames::FrameIndex).between(0, 9))
                    .check(Expr::col(Frames::Roll1).between(0, 10))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_frames_game_id")
                            .from(Frames::Table, Frames::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // one row per (game, frame index)
        manager
            .create_index(
                Index::create()
                    .name("ux_frames_game_frame_index")
                    .table(Frames::Table)
                    .col(Frames::GameId)
                    .col(Frames::FrameIndex)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // high_scores
        manager
            .create_table(
                Table::create()
                    .table(HighScores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HighScores::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(HighScores::GameId).big_integer().null())
                    .col(ColumnDef::new(HighScores::Name).string().not_null())
                    .col(ColumnDef::new(HighScores::Score).small_integer().not_null())
                    .col(
                        ColumnDef::new(HighScores::AchievedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .check(Expr::col(HighScores::Score).between(0, 300))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_high_scores_game_id")
                            .from(HighScores::Table, HighScores::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_high_scores_score")
                    .table(HighScores::Table)
                    .col(HighScores::Score)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ix_high_scores_score")
                    .table(HighScores::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(HighScores::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_frames_game_frame_index")
                    .table(Frames::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Frames::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;

        Ok(())
    }
}
