use sea_orm::DatabaseConnection;

use crate::domain::DEFAULT_HIGH_SCORE_LIMIT;

/// Shared application state, cloned into every worker.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Connection pool (absent in tests that never touch the database)
    pub db: Option<DatabaseConnection>,
    /// How many high scores are retained
    pub high_score_limit: usize,
}

impl AppState {
    pub fn new(db: DatabaseConnection, high_score_limit: usize) -> Self {
        Self {
            db: Some(db),
            high_score_limit,
        }
    }

    pub fn without_db(high_score_limit: usize) -> Self {
        Self {
            db: None,
            high_score_limit,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::without_db(DEFAULT_HIGH_SCORE_LIMIT)
    }
}
