//! Game routes: create, read, submit a turn.

use actix_web::http::header::{ETAG, IF_MATCH, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::domain::RollInput;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{GameId, ValidatedJson};
use crate::http::etag::{game_etag, if_none_match_hits, parse_game_version_from_etag};
use crate::repos::games::Game;
use crate::services::{GameService, TurnOutcome};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitTurnRequest {
    pub roll1: i32,
    #[serde(default)]
    pub roll2: Option<i32>,
    #[serde(default)]
    pub roll3: Option<i32>,
}

impl From<&SubmitTurnRequest> for RollInput {
    fn from(req: &SubmitTurnRequest) -> Self {
        RollInput {
            roll1: req.roll1,
            roll2: req.roll2,
            roll3: req.roll3,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FrameResponse {
    pub index: u8,
    pub roll1: u8,
    pub roll2: Option<u8>,
    pub roll3: Option<u8>,
    pub score: Option<u16>,
    pub running_total: Option<u16>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub id: i64,
    pub name: String,
    pub frames: Vec<FrameResponse>,
    pub total_score: u16,
    pub current_frame: u8,
    pub is_complete: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
    pub lock_version: i32,
}

impl From<&Game> for GameResponse {
    fn from(game: &Game) -> Self {
        let card = game.scorecard();
        let frames = card
            .frames()
            .iter()
            .zip(card.running_totals())
            .map(|(f, running_total)| FrameResponse {
                index: f.index,
                roll1: f.roll1,
                roll2: f.roll2,
                roll3: f.roll3,
                score: f.score,
                running_total,
            })
            .collect();

        Self {
            id: game.id,
            name: game.name.clone(),
            frames,
            total_score: game.total_score,
            current_frame: game.current_frame,
            is_complete: game.is_complete,
            created_at: game.created_at,
            updated_at: game.updated_at,
            completed_at: game.completed_at,
            lock_version: game.lock_version,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub success: bool,
    pub error_reason: Option<String>,
    pub game: GameResponse,
}

impl From<&TurnOutcome> for TurnResponse {
    fn from(outcome: &TurnOutcome) -> Self {
        Self {
            success: outcome.success,
            error_reason: outcome.error_reason.map(|r| r.as_str().to_string()),
            game: GameResponse::from(&outcome.game),
        }
    }
}

fn with_etag(status: StatusCode, game: &Game, body: impl Serialize) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((ETAG, game_etag(game.id, game.lock_version)))
        .json(body)
}

/// Lock version demanded by `If-Match`, if the client sent one.
fn expected_version(req: &HttpRequest, game_id: i64) -> Result<Option<i32>, AppError> {
    let Some(value) = req.headers().get(IF_MATCH) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| {
        AppError::bad_request(ErrorCode::BadRequest, "If-Match header is not valid ASCII")
    })?;
    if value.trim() == "*" {
        return Ok(None);
    }
    parse_game_version_from_etag(value, game_id).map(Some)
}

/// POST /api/games
async fn create_game(
    http_req: HttpRequest,
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let name = body.into_inner().name;
    let limit = app_state.high_score_limit;

    let game = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { GameService::new(limit).start_game(txn, &name).await })
    })
    .await?;

    Ok(with_etag(StatusCode::CREATED, &game, GameResponse::from(&game)))
}

/// GET /api/games/{game_id}
///
/// `If-None-Match` with the current ETag yields `304 Not Modified`.
async fn get_game(
    http_req: HttpRequest,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;
    let limit = app_state.high_score_limit;

    let game = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { GameService::new(limit).get_game(txn, id).await })
    })
    .await?
    .ok_or_else(|| {
        AppError::not_found(ErrorCode::GameNotFound, format!("Game {id} not found"))
    })?;

    let etag = game_etag(game.id, game.lock_version);
    let cached = http_req
        .headers()
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| if_none_match_hits(v, &etag));
    if cached {
        return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED)
            .insert_header((ETAG, etag))
            .finish());
    }

    Ok(with_etag(StatusCode::OK, &game, GameResponse::from(&game)))
}

/// POST /api/games/{game_id}/turns
///
/// A rejected turn is reported as Problem Details and rolls the transaction back.
async fn submit_turn(
    http_req: HttpRequest,
    game_id: GameId,
    body: ValidatedJson<SubmitTurnRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;
    let expected = expected_version(&http_req, id)?;
    let input = RollInput::from(&*body);
    let limit = app_state.high_score_limit;

    let outcome = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            GameService::new(limit)
                .submit_turn(txn, id, input, expected)
                .await?
                .accepted_or_err()
        })
    })
    .await?;

    Ok(with_etag(StatusCode::OK, &outcome.game, TurnResponse::from(&outcome)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_game))
        .route("/{game_id}", web::get().to(get_game))
        .route("/{game_id}/turns", web::post().to(submit_turn));
}
