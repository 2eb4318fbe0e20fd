use backend::adapters::high_scores_sea::{self, HighScoreCreate};
use backend::db::require_db;
use backend::domain::HighScore;
use backend::repos::high_scores as high_scores_repo;
use time::{Duration, OffsetDateTime};

use crate::support::build_test_state;

fn entry(name: &str, score: u16, achieved_at: OffsetDateTime) -> HighScore {
    HighScore {
        id: 0,
        game_id: None,
        name: name.to_string(),
        score,
        achieved_at,
    }
}

#[tokio::test]
async fn find_top_orders_by_score_then_time() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let t0 = OffsetDateTime::now_utc();

    for (name, score, offset) in [("late", 200, 5), ("early", 200, 1), ("best", 250, 3)] {
        high_scores_sea::create_high_score(
            db,
            HighScoreCreate {
                game_id: None,
                name: name.to_string(),
                score,
                achieved_at: t0 + Duration::seconds(offset),
            },
        )
        .await?;
    }

    let rows = high_scores_sea::find_top(db, 2).await?;
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["best", "early"]);
    Ok(())
}

#[tokio::test]
async fn offer_prunes_to_limit() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let t0 = OffsetDateTime::now_utc();

    for (i, score) in [100u16, 120, 90].into_iter().enumerate() {
        let at = t0 + Duration::seconds(i as i64);
        let inserted = high_scores_repo::offer(db, entry("p", score, at), 3).await?;
        assert!(inserted.is_some());
    }

    let kept = high_scores_repo::offer(db, entry("q", 110, t0 + Duration::seconds(10)), 3).await?;
    assert_eq!(kept.map(|h| h.score), Some(110));

    let refused = high_scores_repo::offer(db, entry("r", 80, t0 + Duration::seconds(11)), 3).await?;
    assert!(refused.is_none());

    let board = high_scores_repo::find_top(db, 10).await?;
    let scores: Vec<u16> = board.iter().map(|h| h.score).collect();
    assert_eq!(scores, vec![120, 110, 100]);
    assert_eq!(high_scores_sea::find_all(db).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn delete_by_ids_ignores_empty_input() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let row = high_scores_sea::create_high_score(
        db,
        HighScoreCreate {
            game_id: None,
            name: "solo".into(),
            score: 42,
            achieved_at: OffsetDateTime::now_utc(),
        },
    )
    .await?;

    high_scores_sea::delete_by_ids(db, &[]).await?;
    assert_eq!(high_scores_sea::find_all(db).await?.len(), 1);

    high_scores_sea::delete_by_ids(db, &[row.id]).await?;
    assert!(high_scores_sea::find_all(db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn board_lock_is_a_noop_on_sqlite() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    high_scores_sea::lock_board(db).await?;
    high_scores_sea::lock_board(db).await?;
    Ok(())
}

// Two writers that pruned against the same snapshot each evict the same row
// and leave the board one past the limit. The next offer must repair it.
#[tokio::test]
async fn offer_repairs_board_left_past_limit_by_stale_writers(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let t0 = OffsetDateTime::now_utc();

    for (i, score) in [150u16, 140, 130].into_iter().enumerate() {
        high_scores_repo::offer(db, entry("seed", score, t0 + Duration::seconds(i as i64)), 3)
            .await?;
    }
    let snapshot = high_scores_sea::find_all(db).await?;
    let last_id = snapshot.last().map(|r| r.id).ok_or("seeded board is empty")?;

    for (name, score, offset) in [("x", 145i16, 10), ("y", 135, 11)] {
        high_scores_sea::create_high_score(
            db,
            HighScoreCreate {
                game_id: None,
                name: name.to_string(),
                score,
                achieved_at: t0 + Duration::seconds(offset),
            },
        )
        .await?;
        high_scores_sea::delete_by_ids(db, &[last_id]).await?;
    }
    assert_eq!(high_scores_sea::find_all(db).await?.len(), 4);

    let kept = high_scores_repo::offer(db, entry("z", 160, t0 + Duration::seconds(12)), 3).await?;
    assert!(kept.is_some());

    let board = high_scores_repo::find_top(db, 10).await?;
    let scores: Vec<u16> = board.iter().map(|h| h.score).collect();
    assert_eq!(scores, vec![160, 150, 145]);
    assert_eq!(high_scores_sea::find_all(db).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn prune_keeps_only_the_top_entries() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let t0 = OffsetDateTime::now_utc();

    for (i, score) in [10i16, 40, 30, 20].into_iter().enumerate() {
        high_scores_sea::create_high_score(
            db,
            HighScoreCreate {
                game_id: None,
                name: format!("p{i}"),
                score,
                achieved_at: t0 + Duration::seconds(i as i64),
            },
        )
        .await?;
    }

    assert_eq!(high_scores_repo::prune(db, 2).await?, 2);
    assert_eq!(high_scores_repo::prune(db, 2).await?, 0);

    let scores: Vec<u16> = high_scores_repo::find_top(db, 10)
        .await?
        .iter()
        .map(|h| h.score)
        .collect();
    assert_eq!(scores, vec![40, 30]);
    Ok(())
}
