//! DTOs for frames_sea adapter.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCreate {
    pub game_id: i64,
    pub frame_index: i16,
    pub roll1: i16,
    pub roll2: Option<i16>,
    pub roll3: Option<i16>,
    pub score: Option<i16>,
}

/// New score for an already stored frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameScoreUpdate {
    pub id: i64,
    pub score: Option<i16>,
}
