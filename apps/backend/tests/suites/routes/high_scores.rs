use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::{json, Value};

use crate::support::http::{create_game_id, submit_turn};
use crate::support::test_state::build_test_state_with_limit;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn empty_board_is_empty_array() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/high-scores").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));
    Ok(())
}

#[actix_web::test]
async fn board_is_sorted_and_bounded() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state_with_limit(2).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    for (name, pins) in [("Low", 1), ("High", 4), ("Mid", 3)] {
        let id = create_game_id(&app, name).await;
        for _ in 0..10 {
            let resp = submit_turn(&app, id, json!({ "roll1": pins, "roll2": 0 }), None).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }

    let req = test::TestRequest::get().uri("/api/high-scores").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "High");
    assert_eq!(rows[0]["score"], 40);
    assert_eq!(rows[1]["name"], "Mid");
    assert_eq!(rows[1]["score"], 30);
    assert!(rows[0]["achievedAt"].is_string());

    let req = test::TestRequest::get()
        .uri("/api/high-scores?limit=1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get()
        .uri("/api/high-scores?limit=50")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    Ok(())
}

#[actix_web::test]
async fn bad_limit_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    for uri in ["/api/high-scores?limit=abc", "/api/high-scores?limit=-3"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(
            resp,
            "BAD_REQUEST",
            StatusCode::BAD_REQUEST,
            Some("Invalid query string"),
        )
        .await;
    }
    Ok(())
}
