use sea_orm::ConnectionTrait;

use crate::domain::HighScore;
use crate::error::AppError;
use crate::repos::high_scores;

/// Read side of the leaderboard.
pub struct HighScoreService {
    retention: usize,
}

impl HighScoreService {
    pub fn new(retention: usize) -> Self {
        Self { retention }
    }

    /// Best scores, at most `min(limit, retention)` of them.
    pub async fn get_high_scores<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        limit: Option<usize>,
    ) -> Result<Vec<HighScore>, AppError> {
        let limit = limit.unwrap_or(self.retention).min(self.retention);
        if limit == 0 {
            return Ok(Vec::new());
        }
        Ok(high_scores::find_top(conn, limit).await?)
    }
}
