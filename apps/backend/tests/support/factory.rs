use backend::domain::RollInput;
use backend::repos::games::Game;
use backend::services::GameService;
use backend::AppError;
use backend_test_support::unique_helpers::unique_name;
use sea_orm::ConnectionTrait;

/// Start a game under a unique player name.
pub async fn start_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    prefix: &str,
) -> Result<Game, AppError> {
    GameService::new(5).start_game(conn, &unique_name(prefix)).await
}

/// Submit every turn in order, failing on the first rejection.
pub async fn play_turns<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    service: &GameService,
    game_id: i64,
    turns: &[RollInput],
) -> Result<Game, AppError> {
    let mut last = None;
    for turn in turns {
        let game = service
            .submit_turn(conn, game_id, *turn, None)
            .await?
            .into_result()?;
        last = Some(game);
    }
    match last {
        Some(game) => Ok(game),
        None => backend::repos::games::require_game(conn, game_id)
            .await
            .map_err(AppError::from),
    }
}

/// Ten frames of `(a, b)` open frames; total is `10 * (a + b)`.
pub fn open_game(a: i32, b: i32) -> Vec<RollInput> {
    vec![RollInput::pair(a, b); 10]
}

/// Twelve strikes.
pub fn perfect_game() -> Vec<RollInput> {
    let mut turns = vec![RollInput::strike(); 9];
    turns.push(RollInput::triple(10, 10, 10));
    turns
}

/// A complete game scoring exactly `10 * (a + b)` with `a + b < 10`.
pub fn game_scoring(total: u16) -> Vec<RollInput> {
    assert!(total % 10 == 0 && total <= 90, "only open-frame totals");
    let per_frame = i32::from(total / 10);
    let first = per_frame.min(5);
    open_game(first, per_frame - first)
}
