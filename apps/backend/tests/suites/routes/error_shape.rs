use actix_web::http::StatusCode;
use actix_web::test;
use backend::state::app_state::AppState;
use serde_json::json;

use crate::common::assert_problem_details_structure;
use crate::support::http::submit_turn;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn unknown_game_is_404_problem() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/games/987654").to_request();
    let resp = test::call_service(&app, req).await;
    let body = assert_problem_details_structure(resp, 404, "GAME_NOT_FOUND").await;
    assert_eq!(body["detail"], "Game 987654 not found");
    assert_eq!(body["title"], "Game Not Found");

    let resp = submit_turn(&app, 987654, json!({ "roll1": 3, "roll2": 3 }), None).await;
    assert_problem_details_structure(resp, 404, "GAME_NOT_FOUND").await;
    Ok(())
}

#[actix_web::test]
async fn path_ids_are_checked_before_lookup() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/games/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST").await;

    let req = test::TestRequest::get().uri("/api/games/0").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "GAME_NOT_FOUND").await;
    Ok(())
}

#[actix_web::test]
async fn malformed_bodies_are_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST").await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!({ "nickname": "Ada" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST").await;

    let huge = "x".repeat(backend::extractors::validated_json::MAX_BODY_BYTES + 1);
    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!({ "name": huge }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST").await;
    Ok(())
}

#[actix_web::test]
async fn bad_player_names_are_422() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    for name in ["", "   ", "line\nbreak"] {
        let req = test::TestRequest::post()
            .uri("/api/games")
            .set_json(json!({ "name": name }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_structure(resp, 422, "INVALID_PLAYER_NAME").await;
    }
    Ok(())
}

#[actix_web::test]
async fn trace_id_is_echoed_from_request() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;
    let incoming = "0b8f1d2e-6a55-4c1e-9d8a-3f1f0c2b7e11";

    let req = test::TestRequest::get()
        .uri("/api/games/424242")
        .insert_header(("x-request-id", incoming))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some(incoming)
    );
    let body = assert_problem_details_structure(resp, 404, "GAME_NOT_FOUND").await;
    assert_eq!(body["trace_id"], incoming);
    Ok(())
}

#[actix_web::test]
async fn missing_database_is_503_with_retry_after() {
    let app = create_test_app(AppState::without_db(5))
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/api/games/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_problem_details_structure(resp, 503, "DB_UNAVAILABLE").await;
}
