use backend::adapters::games_sea::{self, GameCreate, GameProgress};
use backend::db::require_db;
use backend::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use backend::infra::db_errors::map_db_err;
use time::OffsetDateTime;

use crate::support::build_test_state;

#[tokio::test]
async fn create_starts_at_version_one() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let row = games_sea::create_game(db, GameCreate::new("Ada")).await?;
    assert!(row.id > 0);
    assert_eq!(row.lock_version, 1);
    assert_eq!(row.total_score, 0);
    assert!(!row.is_complete);
    assert!(row.completed_at.is_none());

    let found = games_sea::find_by_id(db, row.id).await?.expect("row just inserted");
    assert_eq!(found.id, row.id);
    assert_eq!(found.name, "Ada");
    Ok(())
}

#[tokio::test]
async fn update_progress_bumps_version() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let row = games_sea::create_game(db, GameCreate::new("Bob")).await?;

    let done_at = OffsetDateTime::now_utc();
    let updated = games_sea::update_progress(
        db,
        GameProgress::new(row.id, 1)
            .with_total(123)
            .with_current_frame(10)
            .completed_at(done_at),
    )
    .await?;

    assert_eq!(updated.lock_version, 2);
    assert_eq!(updated.total_score, 123);
    assert_eq!(updated.current_frame, 10);
    assert!(updated.is_complete);
    assert!(updated.completed_at.is_some());
    assert!(updated.updated_at >= row.updated_at);
    Ok(())
}

#[tokio::test]
async fn stale_version_maps_to_optimistic_lock() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let row = games_sea::create_game(db, GameCreate::new("Cy")).await?;

    games_sea::update_progress(db, GameProgress::new(row.id, 1).with_total(5)).await?;
    let err = games_sea::update_progress(db, GameProgress::new(row.id, 1).with_total(9))
        .await
        .unwrap_err();

    match map_db_err(err) {
        DomainError::Conflict(ConflictKind::OptimisticLock, detail) => {
            assert!(detail.contains("expected version 1"));
            assert!(detail.contains("actual version 2"));
        }
        other => panic!("expected optimistic lock, got {other:?}"),
    }

    let current = games_sea::require_game(db, row.id).await?;
    assert_eq!(current.total_score, 5);
    Ok(())
}

#[tokio::test]
async fn missing_game_maps_to_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let err = games_sea::require_game(db, 31_337).await.unwrap_err();
    assert_eq!(map_db_err(err), DomainError::game_not_found(31_337));

    let err = games_sea::update_progress(db, GameProgress::new(31_337, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        map_db_err(err),
        DomainError::NotFound(NotFoundKind::Game, _)
    ));
    Ok(())
}
