//! ETags for game resources.
//!
//! A game's ETag encodes its lock version, so `If-Match` doubles as the
//! optimistic-lock precondition and `If-None-Match` as a cache validator.

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Format: `"game-{id}-v{version}"` (quoted, as HTTP requires).
///
/// ```
/// # use backend::http::etag::game_etag;
/// assert_eq!(game_etag(123, 5), r#""game-123-v5""#);
/// ```
pub fn game_etag(id: i64, version: i32) -> String {
    format!(r#""game-{id}-v{version}""#)
}

fn malformed(value: &str) -> AppError {
    AppError::bad_request(
        ErrorCode::BadRequest,
        format!("Invalid ETag '{value}': expected \"game-{{id}}-v{{version}}\""),
    )
}

/// Lock version carried by an ETag for `game_id`.
///
/// Weak tags are accepted. A tag naming another game is rejected.
pub fn parse_game_version_from_etag(value: &str, game_id: i64) -> Result<i32, AppError> {
    let tag = value.trim();
    let tag = tag.strip_prefix("W/").unwrap_or(tag).trim_matches('"');

    let rest = tag.strip_prefix("game-").ok_or_else(|| malformed(value))?;
    let (id, version) = rest.rsplit_once("-v").ok_or_else(|| malformed(value))?;

    let id: i64 = id.parse().map_err(|_| malformed(value))?;
    if id != game_id {
        return Err(AppError::bad_request(
            ErrorCode::BadRequest,
            format!("ETag is for game {id}, not game {game_id}"),
        ));
    }
    version.parse::<i32>().map_err(|_| malformed(value))
}

/// Whether an `If-None-Match` value matches `etag` (weak comparison, `*` matches all).
pub fn if_none_match_hits(header: &str, etag: &str) -> bool {
    let current = etag.trim_start_matches("W/");
    header.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.trim_start_matches("W/") == current
    })
}
