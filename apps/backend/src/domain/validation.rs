//! Roll legality checks.
//!
//! Every roll accepted into a game passes through [`validate_roll`]. Rules are
//! checked in a fixed order and the first failure is reported.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::domain::frame::{RollInput, FINAL_FRAME, PINS};

/// Why a submitted turn was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollRejection {
    /// A roll outside 0..=10, or more pins than are standing.
    InvalidPinCount,
    /// Wrong number of rolls for the frame's situation.
    InvalidRollSequenceForFrame,
    /// All ten frames have already been played.
    GameAlreadyComplete,
}

impl RollRejection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidPinCount => "INVALID_PIN_COUNT",
            Self::InvalidRollSequenceForFrame => "INVALID_ROLL_SEQUENCE",
            Self::GameAlreadyComplete => "GAME_ALREADY_COMPLETE",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidPinCount => "pin count out of range for the rack",
            Self::InvalidRollSequenceForFrame => "roll count does not fit this frame",
            Self::GameAlreadyComplete => "game is already complete",
        }
    }
}

impl Display for RollRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.description())
    }
}

impl std::error::Error for RollRejection {}

/// Check a turn against the frame it would fill.
///
/// `frame_index` is the zero-based index of the frame being played; anything
/// past the tenth frame means the game is over.
pub fn validate_roll(input: &RollInput, frame_index: usize) -> Result<(), RollRejection> {
    if frame_index > FINAL_FRAME {
        return Err(RollRejection::GameAlreadyComplete);
    }

    let roll1 = pin_count(input.roll1)?;
    let roll2 = input.roll2.map(pin_count).transpose()?;
    let roll3 = input.roll3.map(pin_count).transpose()?;

    if frame_index < FINAL_FRAME {
        validate_open_frame(roll1, roll2, roll3)
    } else {
        validate_final_frame(roll1, roll2, roll3)
    }
}

/// Range check for a single roll.
pub(crate) fn pin_count(value: i32) -> Result<u8, RollRejection> {
    u8::try_from(value)
        .ok()
        .filter(|pins| *pins <= PINS)
        .ok_or(RollRejection::InvalidPinCount)
}

fn validate_open_frame(
    roll1: u8,
    roll2: Option<u8>,
    roll3: Option<u8>,
) -> Result<(), RollRejection> {
    if roll3.is_some() {
        return Err(RollRejection::InvalidRollSequenceForFrame);
    }

    if roll1 == PINS {
        return match roll2 {
            None => Ok(()),
            Some(_) => Err(RollRejection::InvalidRollSequenceForFrame),
        };
    }

    let roll2 = roll2.ok_or(RollRejection::InvalidRollSequenceForFrame)?;
    same_rack(roll1, roll2)
}

fn validate_final_frame(
    roll1: u8,
    roll2: Option<u8>,
    roll3: Option<u8>,
) -> Result<(), RollRejection> {
    let roll2 = roll2.ok_or(RollRejection::InvalidRollSequenceForFrame)?;

    let strike = roll1 == PINS;
    if !strike {
        same_rack(roll1, roll2)?;
    }
    let spare = !strike && roll1 + roll2 == PINS;

    // Bonus rolls draw from a reset rack, so roll3 is range checked only.
    match (strike || spare, roll3) {
        (false, None) | (true, Some(_)) => Ok(()),
        (false, Some(_)) | (true, None) => Err(RollRejection::InvalidRollSequenceForFrame),
    }
}

fn same_rack(first: u8, second: u8) -> Result<(), RollRejection> {
    if first + second > PINS {
        Err(RollRejection::InvalidPinCount)
    } else {
        Ok(())
    }
}
