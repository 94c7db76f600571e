use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tenpai_core::hint::discard_candidates;
use tenpai_core::{reachable_discards, score as calc_score, winnable_tiles};
use tenpai_core::{Rules, ScoreRequest, ScoreResult, Tile, TileCounts};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;

#[derive(Debug, Clone)]
pub struct AppState {
    pub rules: Rules,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/winnable", post(winnable))
        .route("/api/reachable", post(reachable))
        .route("/api/score", post(score))
        .route("/api/discard-hint", post(discard_hint))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[derive(Deserialize)]
struct TilesRequest {
    tiles: String,
}

#[derive(Deserialize)]
struct ReachableRequest {
    tiles: String,
    #[serde(default)]
    discarded: String,
}

#[derive(Serialize)]
struct TilesResponse {
    tiles: Vec<Tile>,
    codes: Vec<String>,
}

impl TilesResponse {
    fn new(tiles: impl IntoIterator<Item = Tile>) -> Self {
        let tiles: Vec<Tile> = tiles.into_iter().collect();
        let codes = tiles.iter().map(|t| t.code()).collect();
        TilesResponse { tiles, codes }
    }
}

#[derive(Serialize)]
struct ReachableDiscard {
    tile: Tile,
    code: String,
    winnable: Vec<Tile>,
}

#[derive(Serialize)]
struct ReachableResponse {
    discards: Vec<ReachableDiscard>,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

async fn winnable(Json(req): Json<TilesRequest>) -> Result<Json<TilesResponse>, ApiError> {
    let hand = TileCounts::parse(&req.tiles)?;
    if !hand.is_concealed_size() {
        return Err(ApiError(format!(
            "a waiting hand has 1, 4, 7, 10 or 13 tiles, got {}",
            hand.total()
        )));
    }
    Ok(Json(TilesResponse::new(winnable_tiles(&hand))))
}

async fn reachable(Json(req): Json<ReachableRequest>) -> Result<Json<ReachableResponse>, ApiError> {
    let held = TileCounts::parse(&req.tiles)?;
    let discarded = TileCounts::parse(&req.discarded)?;
    if !held.is_drawn_size() {
        return Err(ApiError(format!(
            "a hand after drawing has 2, 5, 8, 11 or 14 tiles, got {}",
            held.total()
        )));
    }

    let discards = reachable_discards(&held, &discarded)
        .into_iter()
        .map(|(tile, waits)| ReachableDiscard {
            tile,
            code: tile.code(),
            winnable: waits.into_iter().collect(),
        })
        .collect();
    Ok(Json(ReachableResponse { discards }))
}

async fn score(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<ScoreResult>, ApiError> {
    let result = calc_score(&req, &state.rules)?;
    tracing::info!(hand = %req.ready_tiles, tile = %req.winning_tile, points = result.total_points, "scored");
    Ok(Json(result))
}

async fn discard_hint(Json(req): Json<TilesRequest>) -> Result<Json<TilesResponse>, ApiError> {
    let hand = TileCounts::parse(&req.tiles)?;
    Ok(Json(TilesResponse::new(discard_candidates(&hand))))
}

#[derive(Debug)]
pub struct ApiError(String);

impl From<String> for ApiError {
    fn from(msg: String) -> Self {
        ApiError(msg)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self.0, "rejected request");
        (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": self.0 }))).into_response()
    }
}
