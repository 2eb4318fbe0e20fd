use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// `{game_id}` path segment.
///
/// Not a number is `BAD_REQUEST`; zero or negative can never name a game,
/// so it is `GAME_NOT_FOUND` without a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameId(pub i64);

fn parse(raw: Option<&str>) -> Result<GameId, AppError> {
    let raw = raw.ok_or_else(|| {
        AppError::bad_request(ErrorCode::BadRequest, "Missing game_id path parameter")
    })?;

    let id = raw.trim().parse::<i64>().map_err(|_| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Invalid game id: {raw}"))
    })?;

    if id <= 0 {
        return Err(AppError::not_found(
            ErrorCode::GameNotFound,
            format!("Game {id} not found"),
        ));
    }
    Ok(GameId(id))
}

impl FromRequest for GameId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse(req.match_info().get("game_id")))
    }
}
