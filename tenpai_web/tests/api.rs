//! Router tests driven through `oneshot`, no socket involved.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tenpai_core::Rules;
use tenpai_web::{create_router, AppState};
use tower::ServiceExt;

fn app() -> axum::Router {
    create_router(Arc::new(AppState {
        rules: Rules::default(),
    }))
}

async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post(router: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let resp = router
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    (status, body_json(resp.into_body()).await)
}

#[tokio::test]
async fn health_returns_200() {
    let resp = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp.into_body()).await["status"], "OK");
}

#[tokio::test]
async fn winnable_lists_ids_and_codes() {
    let (status, json) = post(app(), "/api/winnable", json!({ "tiles": "A1234" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "tiles": [1, 4], "codes": ["A1", "A4"] }));
}

#[tokio::test]
async fn winnable_rejects_wrong_size() {
    let (status, json) = post(app(), "/api/winnable", json!({ "tiles": "A12" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("got 2"));
}

#[tokio::test]
async fn reachable_honours_discards() {
    let (status, json) = post(
        app(),
        "/api/reachable",
        json!({ "tiles": "A12345", "discarded": "A1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({ "discards": [
            { "tile": 1, "code": "A1", "winnable": [2, 5] },
            { "tile": 4, "code": "A4", "winnable": [5] },
        ]})
    );
}

#[tokio::test]
async fn reachable_rejects_waiting_size() {
    let (status, _) = post(app(), "/api/reachable", json!({ "tiles": "A1234" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn score_full_flush() {
    let (status, json) = post(
        app(),
        "/api/score",
        json!({
            "ready_tiles": "A2349",
            "winning_tile": "A9",
            "win_type": "DISCARD",
            "tiles_remaining": 20,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_points"], 6);
    assert_eq!(json["yaku"][0], json!({ "id": 18, "name": "Full Flush", "points": 6 }));
}

#[tokio::test]
async fn score_uses_configured_deal() {
    let router = create_router(Arc::new(AppState {
        rules: Rules { deal_count: 4 },
    }));
    let (_, json) = post(
        router,
        "/api/score",
        json!({
            "ready_tiles": "A2349",
            "winning_tile": "A9",
            "win_type": "DISCARD",
            "tiles_remaining": 20,
        }),
    )
    .await;
    assert_eq!(json["total_points"], 3);
}

#[tokio::test]
async fn score_rejects_non_winning_tile() {
    let (status, json) = post(
        app(),
        "/api/score",
        json!({
            "ready_tiles": "A234C9",
            "winning_tile": "C8",
            "win_type": "SELF_DRAW",
            "tiles_remaining": 20,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn score_rejects_bad_notation() {
    let (status, _) = post(
        app(),
        "/api/score",
        json!({
            "ready_tiles": "A23Z",
            "winning_tile": "A4",
            "win_type": "DISCARD",
            "tiles_remaining": 20,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn discard_hint_picks_isolated_terminal() {
    let (status, json) = post(app(), "/api/discard-hint", json!({ "tiles": "A234B5C1" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "tiles": [21], "codes": ["C1"] }));
}
