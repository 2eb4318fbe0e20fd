use db_infra::config::db::{DbKind, RuntimeEnv};

use crate::domain::DEFAULT_HIGH_SCORE_LIMIT;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builds `AppState` for `main` and for tests.
pub struct StateBuilder {
    env: RuntimeEnv,
    db_kind: Option<DbKind>,
    high_score_limit: usize,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Prod,
            db_kind: None,
            high_score_limit: DEFAULT_HIGH_SCORE_LIMIT,
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    pub fn with_high_score_limit(mut self, limit: usize) -> Self {
        self.high_score_limit = limit;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        if self.high_score_limit == 0 {
            return Err(AppError::config("high score limit must be at least 1"));
        }
        match self.db_kind {
            Some(kind) => {
                let conn = bootstrap_db(self.env, kind).await?;
                Ok(AppState::new(conn, self.high_score_limit))
            }
            None => Ok(AppState::without_db(self.high_score_limit)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
