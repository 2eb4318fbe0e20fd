use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::domain::HighScore;
use crate::error::AppError;
use crate::services::HighScoreService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct HighScoresQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreResponse {
    pub id: i64,
    pub game_id: Option<i64>,
    pub name: String,
    pub score: u16,
    #[serde(with = "time::serde::rfc3339")]
    pub achieved_at: OffsetDateTime,
}

impl From<HighScore> for HighScoreResponse {
    fn from(h: HighScore) -> Self {
        Self {
            id: h.id,
            game_id: h.game_id,
            name: h.name,
            score: h.score,
            achieved_at: h.achieved_at,
        }
    }
}

/// GET /api/high-scores?limit=N
async fn list_high_scores(
    http_req: HttpRequest,
    query: web::Query<HighScoresQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit;
    let retention = app_state.high_score_limit;

    let entries = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            HighScoreService::new(retention)
                .get_high_scores(txn, limit)
                .await
        })
    })
    .await?;

    let body: Vec<HighScoreResponse> = entries.into_iter().map(HighScoreResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_high_scores));
}
