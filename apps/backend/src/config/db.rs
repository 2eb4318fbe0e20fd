//! Database selection for the backend; the connection details live in `db-infra`.

use std::env;

pub use db_infra::config::db::{DbKind, DbOwner, RuntimeEnv};

use crate::error::AppError;

/// Engine for the running service: `DB_KIND`, Postgres when unset.
pub fn db_kind_from_env() -> Result<DbKind, AppError> {
    kind_from_var("DB_KIND", DbKind::Postgres)
}

/// Engine for test suites: `BOWLING_TEST_DB_KIND`, in-memory SQLite when unset.
pub fn test_db_kind_from_env() -> Result<DbKind, AppError> {
    kind_from_var("BOWLING_TEST_DB_KIND", DbKind::SqliteMemory)
}

fn kind_from_var(var: &str, default: DbKind) -> Result<DbKind, AppError> {
    match env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => Ok(raw.parse::<DbKind>()?),
        _ => Ok(default),
    }
}
