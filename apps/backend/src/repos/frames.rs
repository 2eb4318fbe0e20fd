//! Frame repository functions.

use sea_orm::ConnectionTrait;

use super::narrow;
use crate::adapters::frames_sea as frames_adapter;
use crate::domain::Frame;
use crate::entities::frames;
use crate::errors::domain::DomainError;

/// A frame together with its row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredFrame {
    pub id: i64,
    pub frame: Frame,
}

impl TryFrom<frames::Model> for StoredFrame {
    type Error = DomainError;

    fn try_from(row: frames::Model) -> Result<Self, Self::Error> {
        let mut frame = Frame::new(
            narrow(row.frame_index, "frame_index")?,
            narrow(row.roll1, "roll1")?,
            row.roll2.map(|r| narrow(r, "roll2")).transpose()?,
            row.roll3.map(|r| narrow(r, "roll3")).transpose()?,
        );
        frame.score = row.score.map(|s| narrow(s, "score")).transpose()?;
        Ok(Self { id: row.id, frame })
    }
}

pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<StoredFrame>, DomainError> {
    frames_adapter::find_all_by_game(conn, game_id)
        .await?
        .into_iter()
        .map(StoredFrame::try_from)
        .collect()
}

pub async fn append_frame<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    frame: &Frame,
) -> Result<StoredFrame, DomainError> {
    let dto = frames_adapter::FrameCreate {
        game_id,
        frame_index: i16::from(frame.index),
        roll1: i16::from(frame.roll1),
        roll2: frame.roll2.map(i16::from),
        roll3: frame.roll3.map(i16::from),
        score: frame.score.map(|s| narrow(s, "score")).transpose()?,
    };
    let row = frames_adapter::create_frame(conn, dto).await?;
    StoredFrame::try_from(row)
}

/// Persist scores that differ between `stored` and `rescored` (matched by index).
pub async fn persist_changed_scores<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stored: &[StoredFrame],
    rescored: &[Frame],
) -> Result<u64, DomainError> {
    let mut updates = Vec::new();
    for old in stored {
        let new_score = rescored
            .iter()
            .find(|f| f.index == old.frame.index)
            .and_then(|f| f.score);
        if new_score != old.frame.score {
            updates.push(frames_adapter::FrameScoreUpdate {
                id: old.id,
                score: new_score.map(|s| narrow(s, "score")).transpose()?,
            });
        }
    }

    Ok(frames_adapter::update_scores(conn, &updates).await?)
}
