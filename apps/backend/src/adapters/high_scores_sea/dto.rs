//! DTOs for high_scores_sea adapter.

use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct HighScoreCreate {
    pub game_id: Option<i64>,
    pub name: String,
    pub score: i16,
    pub achieved_at: OffsetDateTime,
}
