//! Bounded leaderboard retention.

use std::cmp::Ordering;

use time::OffsetDateTime;

pub const DEFAULT_HIGH_SCORE_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    pub id: i64,
    pub game_id: Option<i64>,
    pub name: String,
    pub score: u16,
    pub achieved_at: OffsetDateTime,
}

/// Leaderboard order: higher score first, then earlier, then lower id.
pub fn rank_order(a: &HighScore, b: &HighScore) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.achieved_at.cmp(&b.achieved_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Whether a new score achieved at `achieved_at` would survive retention.
///
/// A candidate that ties the last retained entry loses, since it is newer.
pub fn qualifies(board: &[HighScore], score: u16, achieved_at: OffsetDateTime, limit: usize) -> bool {
    if limit == 0 {
        return false;
    }
    if board.len() < limit {
        return true;
    }

    let mut ranked: Vec<&HighScore> = board.iter().collect();
    ranked.sort_by(|a, b| rank_order(a, b));
    match ranked.get(limit - 1) {
        Some(last) => score > last.score || (score == last.score && achieved_at < last.achieved_at),
        None => true,
    }
}

/// Sort the board and cut it to `limit`; returns what fell off.
pub fn retain_top(board: &mut Vec<HighScore>, limit: usize) -> Vec<HighScore> {
    board.sort_by(rank_order);
    if board.len() > limit {
        board.split_off(limit)
    } else {
        Vec::new()
    }
}

/// Offer an entry to an in-memory board.
///
/// Returns `true` when the entry was kept.
#[cfg(test)]
pub fn offer(board: &mut Vec<HighScore>, entry: HighScore, limit: usize) -> bool {
    if !qualifies(board, entry.score, entry.achieved_at, limit) {
        return false;
    }
    let id = entry.id;
    board.push(entry);
    let evicted = retain_top(board, limit);
    !evicted.iter().any(|e| e.id == id)
}
