//! Game repository functions.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use super::frames::{self, StoredFrame};
use super::narrow;
use crate::adapters::games_sea as games_adapter;
use crate::domain::Scorecard;
use crate::entities::games;
use crate::errors::domain::DomainError;

/// A game with its frames in index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub frames: Vec<StoredFrame>,
    pub total_score: u16,
    pub current_frame: u8,
    pub is_complete: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub completed_at: Option<OffsetDateTime>,
    pub lock_version: i32,
}

impl Game {
    fn from_parts(row: games::Model, frames: Vec<StoredFrame>) -> Result<Self, DomainError> {
        Ok(Self {
            id: row.id,
            name: row.name,
            frames,
            total_score: narrow(row.total_score, "total_score")?,
            current_frame: narrow(row.current_frame, "current_frame")?,
            is_complete: row.is_complete,
            created_at: row.created_at,
            updated_at: row.updated_at,
            completed_at: row.completed_at,
            lock_version: row.lock_version,
        })
    }

    /// Frames rescored from their rolls.
    pub fn scorecard(&self) -> Scorecard {
        Scorecard::from_frames(self.frames.iter().map(|s| s.frame).collect())
    }
}

/// Progress to write after a successful append.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    pub total_score: u16,
    pub current_frame: u8,
    pub completed_at: Option<OffsetDateTime>,
}

impl Progress {
    pub fn of(card: &Scorecard, now: OffsetDateTime) -> Self {
        Self {
            total_score: card.total(),
            current_frame: u8::try_from(card.current_frame()).unwrap_or(u8::MAX),
            completed_at: card.is_complete().then_some(now),
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    let Some(row) = games_adapter::find_by_id(conn, game_id).await? else {
        return Ok(None);
    };
    let frames = frames::find_all_by_game(conn, game_id).await?;
    Game::from_parts(row, frames).map(Some)
}

/// Like [`find_by_id`] but a missing game is `GAME_NOT_FOUND`.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    let row = games_adapter::require_game(conn, game_id).await?;
    let frames = frames::find_all_by_game(conn, game_id).await?;
    Game::from_parts(row, frames)
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Game, DomainError> {
    let row = games_adapter::create_game(conn, games_adapter::GameCreate::new(name)).await?;
    Game::from_parts(row, Vec::new())
}

/// Write totals and completion, guarded by `expected_lock_version`.
///
/// Returns the new lock version.
pub async fn update_progress<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    expected_lock_version: i32,
    progress: Progress,
) -> Result<i32, DomainError> {
    let mut dto = games_adapter::GameProgress::new(game_id, expected_lock_version)
        .with_total(narrow(progress.total_score, "total_score")?)
        .with_current_frame(i16::from(progress.current_frame));
    if let Some(at) = progress.completed_at {
        dto = dto.completed_at(at);
    }

    let row = games_adapter::update_progress(conn, dto).await?;
    Ok(row.lock_version)
}
