use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend::http::etag::game_etag;
use serde_json::{json, Value};

use crate::support::{build_test_state, create_test_app, http};

async fn create<S>(app: &S, name: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    http::create_game(app, name).await
}

async fn submit<S>(app: &S, game_id: i64, body: Value) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    http::submit_turn(app, game_id, body, None).await
}

#[actix_web::test]
async fn create_game_returns_201_with_etag() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!({ "name": "  Ada  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let etag = resp
        .headers()
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("ETag header");

    let body: Value = test::read_body_json(resp).await;
    let id = body["id"].as_i64().expect("id");
    assert_eq!(etag, game_etag(id, 1));
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["totalScore"], 0);
    assert_eq!(body["currentFrame"], 0);
    assert_eq!(body["isComplete"], false);
    assert_eq!(body["frames"], json!([]));
    assert!(body["completedAt"].is_null());
    Ok(())
}

#[actix_web::test]
async fn get_game_round_trips_and_honours_if_none_match() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;
    let created = create(&app, "Grace").await;
    let id = created["id"].as_i64().expect("id");

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Grace");

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{id}"))
        .insert_header((IF_NONE_MATCH, game_etag(id, 1)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{id}"))
        .insert_header((IF_NONE_MATCH, game_etag(id, 0)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn strike_then_open_frame_scores_19_then_28() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;
    let id = create(&app, "Strike").await["id"].as_i64().expect("id");

    let resp = submit(&app, id, json!({ "roll1": 10 })).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body["errorReason"].is_null());
    assert!(body["game"]["frames"][0]["score"].is_null());

    let resp = submit(&app, id, json!({ "roll1": 7, "roll2": 2 })).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let frames = &body["game"]["frames"];
    assert_eq!(frames[0]["score"], 19);
    assert_eq!(frames[0]["runningTotal"], 19);
    assert_eq!(frames[1]["runningTotal"], 28);
    assert_eq!(body["game"]["totalScore"], 28);
    assert_eq!(body["game"]["currentFrame"], 2);
    assert_eq!(body["game"]["lockVersion"], 3);
    Ok(())
}

#[actix_web::test]
async fn perfect_game_completes_and_reaches_leaderboard() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;
    let id = create(&app, "Perfect").await["id"].as_i64().expect("id");

    for _ in 0..9 {
        let resp = submit(&app, id, json!({ "roll1": 10 })).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    let resp = submit(&app, id, json!({ "roll1": 10, "roll2": 10, "roll3": 10 })).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["game"]["totalScore"], 300);
    assert_eq!(body["game"]["isComplete"], true);
    assert!(body["game"]["completedAt"].is_string());

    let req = test::TestRequest::get().uri("/api/high-scores").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let board: Value = test::read_body_json(resp).await;
    assert_eq!(board[0]["score"], 300);
    assert_eq!(board[0]["name"], "Perfect");
    assert_eq!(board[0]["gameId"], id);
    Ok(())
}

#[actix_web::test]
async fn turn_after_completion_is_409() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;
    let id = create(&app, "Done").await["id"].as_i64().expect("id");

    for _ in 0..10 {
        let resp = submit(&app, id, json!({ "roll1": 1, "roll2": 1 })).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = submit(&app, id, json!({ "roll1": 1, "roll2": 1 })).await;
    assert_problem_details_from_service_response(
        resp,
        "GAME_ALREADY_COMPLETE",
        StatusCode::CONFLICT,
        None,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn rejected_turn_leaves_game_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;
    let id = create(&app, "Careful").await["id"].as_i64().expect("id");

    let resp = submit(&app, id, json!({ "roll1": 7, "roll2": 5 })).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_PIN_COUNT",
        StatusCode::UNPROCESSABLE_ENTITY,
        None,
    )
    .await;

    let resp = submit(&app, id, json!({ "roll1": 10, "roll2": 5 })).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_ROLL_SEQUENCE",
        StatusCode::UNPROCESSABLE_ENTITY,
        None,
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["frames"], json!([]));
    assert_eq!(body["lockVersion"], 1);
    Ok(())
}

#[actix_web::test]
async fn out_of_range_roll_is_pin_count_not_bad_request() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;
    let id = create(&app, "Wild").await["id"].as_i64().expect("id");

    for body in [json!({ "roll1": 11 }), json!({ "roll1": -1, "roll2": 3 })] {
        let resp = submit(&app, id, body).await;
        assert_problem_details_from_service_response(
            resp,
            "INVALID_PIN_COUNT",
            StatusCode::UNPROCESSABLE_ENTITY,
            None,
        )
        .await;
    }
    Ok(())
}
