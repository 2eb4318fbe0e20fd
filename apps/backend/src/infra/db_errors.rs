//! SeaORM -> DomainError translation.
//!
//! Adapters signal domain conditions through `DbErr::Custom` with a
//! `CODE:payload` message; everything else is classified by backend message.

use sea_orm::DbErr;
use serde::Deserialize;
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

pub const GAME_NOT_FOUND_PREFIX: &str = "GAME_NOT_FOUND:";
pub const OPTIMISTIC_LOCK_PREFIX: &str = "OPTIMISTIC_LOCK:";

/// Unique index guarding one row per (game, frame index).
const FRAME_SLOT_INDEX: &str = "ux_frames_game_frame_index";

#[derive(Deserialize)]
struct LockInfo {
    expected: i32,
    actual: i32,
}

/// Build the adapter-level "game missing" error.
pub fn game_not_found_err(game_id: i64) -> DbErr {
    DbErr::Custom(format!("{GAME_NOT_FOUND_PREFIX}{game_id}"))
}

/// Build the adapter-level lock mismatch error.
pub fn optimistic_lock_err(expected: i32, actual: i32) -> DbErr {
    DbErr::Custom(format!(
        "{OPTIMISTIC_LOCK_PREFIX}{{\"expected\":{expected},\"actual\":{actual}}}"
    ))
}

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

fn is_unique_violation(msg: &str) -> bool {
    mentions_sqlstate(msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

/// SQLite reports columns, Postgres reports the index name.
fn is_frame_slot_violation(msg: &str) -> bool {
    msg.contains(FRAME_SLOT_INDEX) || msg.contains("frames.game_id, frames.frame_index")
}

pub fn map_db_err(e: DbErr) -> DomainError {
    let trace_id = trace_ctx::trace_id();

    match &e {
        DbErr::RecordNotFound(what) => {
            return DomainError::not_found(NotFoundKind::Other(what.clone()), "Record not found");
        }
        DbErr::Custom(msg) => {
            if let Some(raw_id) = msg.strip_prefix(GAME_NOT_FOUND_PREFIX) {
                return match raw_id.parse::<i64>() {
                    Ok(game_id) => {
                        warn!(trace_id = %trace_id, game_id, "game not found");
                        DomainError::game_not_found(game_id)
                    }
                    Err(_) => DomainError::not_found(NotFoundKind::Game, "Game not found"),
                };
            }
            if let Some(payload) = msg.strip_prefix(OPTIMISTIC_LOCK_PREFIX) {
                return match serde_json::from_str::<LockInfo>(payload) {
                    Ok(info) => {
                        warn!(
                            trace_id = %trace_id,
                            expected = info.expected,
                            actual = info.actual,
                            "optimistic lock conflict"
                        );
                        DomainError::conflict(
                            ConflictKind::OptimisticLock,
                            format!(
                                "Game was modified concurrently (expected version {}, actual version {}). Refresh and retry.",
                                info.expected, info.actual
                            ),
                        )
                    }
                    Err(_) => DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        "Game was modified concurrently; refresh and retry",
                    ),
                };
            }
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, error = %e, "database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    let msg = e.to_string();

    if is_unique_violation(&msg) {
        if is_frame_slot_violation(&msg) {
            warn!(trace_id = %trace_id, "frame slot already taken");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Frame was recorded concurrently; refresh and retry",
            );
        }
        warn!(trace_id = %trace_id, error = %msg, "unique constraint violation");
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&msg, "23503")
        || msg.contains("FOREIGN KEY constraint failed")
        || msg.contains("violates foreign key constraint")
    {
        warn!(trace_id = %trace_id, error = %msg, "foreign key violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if mentions_sqlstate(&msg, "23514")
        || msg.contains("CHECK constraint failed")
        || msg.contains("violates check constraint")
    {
        error!(trace_id = %trace_id, error = %msg, "check constraint violation");
        return DomainError::infra(
            InfraErrorKind::DataCorruption,
            "Stored data violates a schema constraint",
        );
    }

    if msg.contains("timeout") || msg.contains("timed out") || msg.contains("pool") {
        warn!(trace_id = %trace_id, error = %msg, "database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, error = %msg, "unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        map_db_err(e)
    }
}
