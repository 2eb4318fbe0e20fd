//! DTOs for games_sea adapter.

use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct GameCreate {
    pub name: String,
}

impl GameCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Score and progress written after a frame is appended.
///
/// Applied only if the row is still at `expected_lock_version`.
#[derive(Debug, Clone)]
pub struct GameProgress {
    pub id: i64,
    pub expected_lock_version: i32,
    pub total_score: i16,
    pub current_frame: i16,
    pub is_complete: bool,
    pub completed_at: Option<OffsetDateTime>,
}

impl GameProgress {
    pub fn new(id: i64, expected_lock_version: i32) -> Self {
        Self {
            id,
            expected_lock_version,
            total_score: 0,
            current_frame: 0,
            is_complete: false,
            completed_at: None,
        }
    }

    pub fn with_total(mut self, total_score: i16) -> Self {
        self.total_score = total_score;
        self
    }

    pub fn with_current_frame(mut self, current_frame: i16) -> Self {
        self.current_frame = current_frame;
        self
    }

    pub fn completed_at(mut self, at: OffsetDateTime) -> Self {
        self.is_complete = true;
        self.completed_at = Some(at);
        self
    }
}
