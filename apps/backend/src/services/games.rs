//! Game lifecycle: start a game, submit turns, read it back.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

use crate::domain::{record_frame, HighScore, RollInput, RollRejection};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::games::{Game, Progress};
use crate::repos::{frames, games, high_scores};

pub const MAX_NAME_CHARS: usize = 64;

/// Trim, NFKC-normalize and check a player name.
pub fn normalize_player_name(raw: &str) -> Result<String, DomainError> {
    let name: String = raw.trim().nfkc().collect();

    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerName,
            "Player name must not be empty",
        ));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerName,
            format!("Player name must be at most {MAX_NAME_CHARS} characters"),
        ));
    }
    if name.chars().any(char::is_control) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerName,
            "Player name must not contain control characters",
        ));
    }
    Ok(name)
}

/// Result of one submission. A rejected turn leaves the game untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub success: bool,
    pub error_reason: Option<RollRejection>,
    pub game: Game,
}

impl TurnOutcome {
    fn accepted(game: Game) -> Self {
        Self {
            success: true,
            error_reason: None,
            game,
        }
    }

    fn rejected(reason: RollRejection, game: Game) -> Self {
        Self {
            success: false,
            error_reason: Some(reason),
            game,
        }
    }

    /// Keep an accepted outcome; turn a rejection into the matching API error.
    pub fn accepted_or_err(self) -> Result<Self, AppError> {
        match self.error_reason {
            Some(reason) => Err(DomainError::from(reason).into()),
            None => Ok(self),
        }
    }

    pub fn into_result(self) -> Result<Game, AppError> {
        self.accepted_or_err().map(|outcome| outcome.game)
    }
}

pub struct GameService {
    high_score_limit: usize,
}

impl GameService {
    pub fn new(high_score_limit: usize) -> Self {
        Self { high_score_limit }
    }

    pub async fn start_game<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<Game, AppError> {
        let name = normalize_player_name(name)?;
        let game = games::create_game(conn, &name).await?;
        info!(game_id = game.id, "game started");
        Ok(game)
    }

    pub async fn get_game<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
    ) -> Result<Option<Game>, AppError> {
        Ok(games::find_by_id(conn, game_id).await?)
    }

    /// Validate and record one frame.
    ///
    /// Rule violations come back as a rejected [`TurnOutcome`]; a stale
    /// `expected_lock_version` or a concurrent writer is `OPTIMISTIC_LOCK`.
    pub async fn submit_turn<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        input: RollInput,
        expected_lock_version: Option<i32>,
    ) -> Result<TurnOutcome, AppError> {
        let game = games::require_game(conn, game_id).await?;

        if let Some(expected) = expected_lock_version {
            if expected != game.lock_version {
                return Err(DomainError::conflict(
                    ConflictKind::OptimisticLock,
                    format!(
                        "Game was modified concurrently (expected version {expected}, actual version {}). Refresh and retry.",
                        game.lock_version
                    ),
                )
                .into());
            }
        }

        let mut card = game.scorecard();
        if let Err(reason) = record_frame(&mut card, &input) {
            debug!(game_id, frame_index = card.frames().len(), reason = reason.as_str(), "turn rejected");
            return Ok(TurnOutcome::rejected(reason, game));
        }

        let now = OffsetDateTime::now_utc();
        let progress = Progress::of(&card, now);

        // Version bump first: a concurrent writer fails here, before the insert.
        games::update_progress(conn, game_id, game.lock_version, progress).await?;

        let Some(new_frame) = card.frames().last() else {
            return Err(AppError::internal(
                crate::errors::ErrorCode::InternalError,
                "scorecard empty after recording a frame",
            ));
        };
        frames::append_frame(conn, game_id, new_frame).await?;
        frames::persist_changed_scores(conn, &game.frames, card.frames()).await?;

        info!(
            game_id,
            frame_index = new_frame.index,
            total = progress.total_score,
            complete = card.is_complete(),
            "turn recorded"
        );

        if card.is_complete() {
            let candidate = HighScore {
                id: 0,
                game_id: Some(game_id),
                name: game.name.clone(),
                score: progress.total_score,
                achieved_at: now,
            };
            if let Some(entry) = high_scores::offer(conn, candidate, self.high_score_limit).await? {
                info!(game_id, high_score_id = entry.id, score = entry.score, "high score recorded");
            }
        }

        let game = games::require_game(conn, game_id).await?;
        Ok(TurnOutcome::accepted(game))
    }
}
