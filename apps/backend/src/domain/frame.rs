//! Frame and roll input value types.

use serde::{Deserialize, Serialize};

/// Pins in a full rack.
pub const PINS: u8 = 10;
/// Frames in a complete game.
pub const FRAMES_PER_GAME: usize = 10;
/// Index of the tenth frame, the only one that may take a third roll.
pub const FINAL_FRAME: usize = FRAMES_PER_GAME - 1;

/// One submitted turn, as received from a caller.
///
/// Values are kept wide so out-of-range input can be rejected as a pin-count
/// problem instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RollInput {
    pub roll1: i32,
    pub roll2: Option<i32>,
    pub roll3: Option<i32>,
}

impl RollInput {
    pub fn strike() -> Self {
        Self {
            roll1: i32::from(PINS),
            ..Self::default()
        }
    }

    pub fn pair(roll1: i32, roll2: i32) -> Self {
        Self {
            roll1,
            roll2: Some(roll2),
            roll3: None,
        }
    }

    pub fn triple(roll1: i32, roll2: i32, roll3: i32) -> Self {
        Self {
            roll1,
            roll2: Some(roll2),
            roll3: Some(roll3),
        }
    }
}

/// A recorded frame.
///
/// `score` stays `None` until every roll it depends on has been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub index: u8,
    pub roll1: u8,
    pub roll2: Option<u8>,
    pub roll3: Option<u8>,
    pub score: Option<u16>,
}

impl Frame {
    pub fn new(index: u8, roll1: u8, roll2: Option<u8>, roll3: Option<u8>) -> Self {
        Self {
            index,
            roll1,
            roll2,
            roll3,
            score: None,
        }
    }

    pub fn is_final(&self) -> bool {
        usize::from(self.index) == FINAL_FRAME
    }

    pub fn is_strike(&self) -> bool {
        self.roll1 == PINS
    }

    /// Both rolls of the first rack used to clear it.
    pub fn is_spare(&self) -> bool {
        !self.is_strike()
            && self
                .roll2
                .is_some_and(|r2| u16::from(self.roll1) + u16::from(r2) == u16::from(PINS))
    }

    /// Rolls in the order they were thrown.
    pub fn rolls(&self) -> impl Iterator<Item = u8> + '_ {
        std::iter::once(self.roll1)
            .chain(self.roll2)
            .chain(self.roll3)
    }

    pub fn pins(&self) -> u16 {
        self.rolls().map(u16::from).sum()
    }

    /// Whether the frame has taken every roll it is owed.
    pub fn is_finished(&self) -> bool {
        if self.is_final() {
            let needs_bonus = self.is_strike() || self.is_spare();
            self.roll2.is_some() && (!needs_bonus || self.roll3.is_some())
        } else {
            self.is_strike() || self.roll2.is_some()
        }
    }
}
