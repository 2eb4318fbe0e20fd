//! Leaderboard repository functions.

use sea_orm::ConnectionTrait;

use super::narrow;
use crate::adapters::high_scores_sea as high_scores_adapter;
use crate::domain::high_scores::{qualifies, retain_top};
use crate::domain::HighScore;
use crate::entities::high_scores;
use crate::errors::domain::DomainError;

impl TryFrom<high_scores::Model> for HighScore {
    type Error = DomainError;

    fn try_from(row: high_scores::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            game_id: row.game_id,
            name: row.name,
            score: narrow(row.score, "score")?,
            achieved_at: row.achieved_at,
        })
    }
}

fn to_domain(rows: Vec<high_scores::Model>) -> Result<Vec<HighScore>, DomainError> {
    rows.into_iter().map(HighScore::try_from).collect()
}

pub async fn find_top<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: usize,
) -> Result<Vec<HighScore>, DomainError> {
    let limit = u64::try_from(limit).unwrap_or(u64::MAX);
    to_domain(high_scores_adapter::find_top(conn, limit).await?)
}

/// Offer a finished game's score to the board, then prune it to `limit`.
///
/// Runs under the board lock. Pruning re-reads the board after the insert, so
/// rows left past `limit` by an earlier writer are dropped as well.
///
/// Returns the inserted entry, or `None` when it would not survive pruning.
pub async fn offer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    candidate: HighScore,
    limit: usize,
) -> Result<Option<HighScore>, DomainError> {
    high_scores_adapter::lock_board(conn).await?;

    let board = to_domain(high_scores_adapter::find_all(conn).await?)?;
    if !qualifies(&board, candidate.score, candidate.achieved_at, limit) {
        return Ok(None);
    }

    let row = high_scores_adapter::create_high_score(
        conn,
        high_scores_adapter::HighScoreCreate {
            game_id: candidate.game_id,
            name: candidate.name,
            score: narrow(candidate.score, "score")?,
            achieved_at: candidate.achieved_at,
        },
    )
    .await?;
    let inserted = HighScore::try_from(row)?;

    prune(conn, limit).await?;
    Ok(Some(inserted))
}

/// Drop every entry ranked below `limit`; returns how many went.
pub async fn prune<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: usize,
) -> Result<u64, DomainError> {
    let mut board = to_domain(high_scores_adapter::find_all(conn).await?)?;
    let evicted: Vec<i64> = retain_top(&mut board, limit).iter().map(|e| e.id).collect();
    Ok(high_scores_adapter::delete_by_ids(conn, &evicted).await?)
}
