//! Frame scoring with strike and spare lookahead.
//!
//! Scores are recomputed over the whole card after every append.

use crate::domain::frame::{Frame, RollInput, FINAL_FRAME, FRAMES_PER_GAME, PINS};
use crate::domain::validation::{pin_count, validate_roll, RollRejection};

/// Ordered frames of one game plus derived scores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorecard {
    frames: Vec<Frame>,
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a card from stored frames, recomputing every score.
    pub fn from_frames(mut frames: Vec<Frame>) -> Self {
        frames.sort_by_key(|f| f.index);
        score_frames(&mut frames);
        Self { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Sum of every frame score that can already be determined.
    pub fn total(&self) -> u16 {
        self.frames.iter().filter_map(|f| f.score).sum()
    }

    /// Index of the next frame to play; equals 10 once the game is over.
    pub fn current_frame(&self) -> usize {
        self.frames.iter().take_while(|f| f.is_finished()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.frames.len() == FRAMES_PER_GAME
            && self.frames.last().is_some_and(Frame::is_finished)
    }

    /// Cumulative total through each frame, `None` from the first unresolved one.
    pub fn running_totals(&self) -> Vec<Option<u16>> {
        let mut acc = Some(0u16);
        self.frames
            .iter()
            .map(|f| {
                acc = acc.zip(f.score).map(|(sum, score)| sum + score);
                acc
            })
            .collect()
    }
}

/// Append a validated frame and rescore the card.
///
/// The input is validated again against the card's own position so a caller
/// holding a stale frame index cannot slip an illegal frame in.
pub fn record_frame(card: &mut Scorecard, input: &RollInput) -> Result<(), RollRejection> {
    if card.frames.len() >= FRAMES_PER_GAME || card.is_complete() {
        return Err(RollRejection::GameAlreadyComplete);
    }

    let index = card.frames.len();
    validate_roll(input, index)?;

    let frame = Frame::new(
        u8::try_from(index).map_err(|_| RollRejection::GameAlreadyComplete)?,
        pin_count(input.roll1)?,
        input.roll2.map(pin_count).transpose()?,
        input.roll3.map(pin_count).transpose()?,
    );

    card.frames.push(frame);
    score_frames(&mut card.frames);
    Ok(())
}

/// Recompute the score of every frame in place.
pub fn score_frames(frames: &mut [Frame]) {
    let scores: Vec<Option<u16>> = (0..frames.len())
        .map(|pos| frame_score(frames, pos))
        .collect();

    for (frame, score) in frames.iter_mut().zip(scores) {
        frame.score = score;
    }
}

fn frame_score(frames: &[Frame], pos: usize) -> Option<u16> {
    let frame = &frames[pos];

    if pos == FINAL_FRAME {
        return frame.is_finished().then(|| frame.pins());
    }

    if frame.is_strike() {
        bonus_rolls(frames, pos, 2).map(|bonus| u16::from(PINS) + bonus)
    } else if frame.is_spare() {
        bonus_rolls(frames, pos, 1).map(|bonus| u16::from(PINS) + bonus)
    } else {
        frame.roll2.map(|r2| u16::from(frame.roll1) + u16::from(r2))
    }
}

/// Sum of the next `count` rolls after frame `pos`, if they have been thrown.
fn bonus_rolls(frames: &[Frame], pos: usize, count: usize) -> Option<u16> {
    let next: Vec<u16> = frames[pos + 1..]
        .iter()
        .flat_map(|f| f.rolls())
        .take(count)
        .map(u16::from)
        .collect();

    (next.len() == count).then(|| next.iter().sum())
}
