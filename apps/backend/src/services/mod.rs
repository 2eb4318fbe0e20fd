pub mod games;
pub mod high_scores;

pub use games::{GameService, TurnOutcome};
pub use high_scores::HighScoreService;
