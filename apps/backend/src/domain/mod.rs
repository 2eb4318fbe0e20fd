//! Domain layer: pure bowling rules, no I/O.

pub mod frame;
pub mod high_scores;
pub mod scoring;
pub mod validation;


// Re-exports for ergonomics
pub use frame::{Frame, RollInput, FINAL_FRAME, FRAMES_PER_GAME, PINS};
pub use high_scores::{HighScore, DEFAULT_HIGH_SCORE_LIMIT};
pub use scoring::{record_frame, score_frames, Scorecard};
pub use validation::{validate_roll, RollRejection};
