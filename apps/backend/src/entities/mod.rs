pub mod frames;
pub mod games;
pub mod high_scores;

pub use frames::Entity as Frames;
pub use frames::Model as FrameRow;
pub use games::Entity as Games;
pub use games::Model as GameRow;
pub use high_scores::Entity as HighScores;
pub use high_scores::Model as HighScoreRow;
