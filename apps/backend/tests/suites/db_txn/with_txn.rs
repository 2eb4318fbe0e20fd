use backend::adapters::games_sea::{self, GameCreate};
use backend::db::require_db;
use backend::db::txn::with_txn;
use backend::db::txn_policy::{current, TxnPolicy};
use backend::errors::ErrorCode;
use backend::state::app_state::AppState;
use backend::AppError;

use crate::support::build_test_state;

#[test]
fn default_policy_commits() {
    assert_eq!(current(), TxnPolicy::CommitOnOk);
}

#[tokio::test]
async fn ok_commits_under_default_policy() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;

    let id = with_txn(None, &state, |txn| {
        Box::pin(async move {
            let row = games_sea::create_game(txn, GameCreate::new("kept")).await?;
            Ok::<_, AppError>(row.id)
        })
    })
    .await?;

    let found = games_sea::find_by_id(require_db(&state)?, id).await?;
    assert!(found.is_some());
    Ok(())
}

#[tokio::test]
async fn err_always_rolls_back() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;

    let result: Result<i64, AppError> = with_txn(None, &state, |txn| {
        Box::pin(async move {
            let row = games_sea::create_game(txn, GameCreate::new("discarded")).await?;
            Err::<i64, AppError>(AppError::conflict(
                ErrorCode::Conflict,
                format!("abandon {}", row.id),
            ))
        })
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::Conflict);
    let id: i64 = err
        .detail()
        .trim_start_matches("abandon ")
        .parse()
        .expect("detail carries the id");

    let found = games_sea::find_by_id(require_db(&state)?, id).await?;
    assert!(found.is_none());
    Ok(())
}

#[tokio::test]
async fn missing_database_is_unavailable() {
    let state = AppState::without_db(5);
    let result = with_txn(None, &state, |_txn| Box::pin(async { Ok::<_, AppError>(()) })).await;
    assert_eq!(result.unwrap_err().code(), ErrorCode::DbUnavailable);
}
