//! Error codes for the bowling backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Roll and request validation
    /// Roll outside 0..=10 or more pins than are standing
    InvalidPinCount,
    /// Wrong number of rolls for the frame
    InvalidRollSequence,
    /// Player name empty, too long or containing control characters
    InvalidPlayerName,
    /// General validation error
    ValidationError,
    /// Malformed JSON, path segment or header
    BadRequest,

    // Resource Not Found
    GameNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// All ten frames already played
    GameAlreadyComplete,
    /// Lock version mismatch (stale If-Match or concurrent submission)
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,
    DataCorruption,
    ConfigError,
    InternalError,
}

impl ErrorCode {
    /// The exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidPinCount => "INVALID_PIN_COUNT",
            Self::InvalidRollSequence => "INVALID_ROLL_SEQUENCE",
            Self::InvalidPlayerName => "INVALID_PLAYER_NAME",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::GameAlreadyComplete => "GAME_ALREADY_COMPLETE",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::ConfigError => "CONFIG_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
