//! JSON service over the mock generator.

use crate::mock::MockGenerator;
use crate::wire::{
    GamesQuery, GamesResponse, INVALID_DATE_MESSAGE, RosterQuery, ScoresResponse,
};
use crate::{GamePlayerStats, ScoreState};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use log::{debug, info};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<MockGenerator>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ServiceError {
    NotFound(String),
    BadRequest(String),
    NotPossible(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ServiceError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            ServiceError::NotPossible(msg) => write!(f, "Not possible: {msg}"),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServiceError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServiceError::NotPossible(msg) => (StatusCode::BAD_REQUEST, msg),
        };
        let body = serde_json::json!({ "error": msg });
        (status, Json(body)).into_response()
    }
}

pub fn router(generator: MockGenerator) -> Router {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .route("/games", get(list_games))
                .route("/games/{id}/scores", get(get_scores))
                .route("/games/{id}/players", get(get_player_stats)),
        )
        .with_state(AppState { generator: Arc::new(generator) })
}

/// Serve the API on `listener` until `shutdown_signal` resolves.
pub async fn serve(
    listener: TcpListener,
    generator: MockGenerator,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    info!("API server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(generator))
        .with_graceful_shutdown(shutdown_signal)
        .await?;
    info!("HTTP API shut down gracefully");
    Ok(())
}

fn parse_date(raw: &str) -> ServiceResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ServiceError::BadRequest(INVALID_DATE_MESSAGE.to_string()))
}

/// `GET /api/games?date=YYYY-MM-DD`, today in league time when `date` is absent.
async fn list_games(
    State(state): State<AppState>,
    Query(query): Query<GamesQuery>,
) -> ServiceResult<Json<GamesResponse>> {
    let date = match query.date.as_deref().filter(|d| !d.is_empty()) {
        Some(raw) => parse_date(raw)?,
        None => state.generator.today(),
    };
    let games = state.generator.schedule(date);
    debug!("serving {} games for {date}", games.len());
    Ok(Json(GamesResponse::new(date.format("%Y-%m-%d").to_string(), games)))
}

/// `GET /api/games/{id}/scores`. Status comes from the game's tip-off; ids
/// that are not on a generated schedule are scored as finished games.
async fn get_scores(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<Json<ScoresResponse>> {
    let scores = match state.generator.find_game(&id) {
        Some(game) => state
            .generator
            .scores_for(&game)
            .ok_or_else(|| ServiceError::NotPossible("Game has not started yet".to_string()))?,
        None => state.generator.scores(&id, ScoreState::Final),
    };
    debug!("serving scores for {id}");
    Ok(Json(ScoresResponse {
        game_id: id,
        scores,
        last_updated: state.generator.now(),
    }))
}

/// `GET /api/games/{id}/players[?home=&away=]`.
async fn get_player_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(roster): Query<RosterQuery>,
) -> ServiceResult<Json<GamePlayerStats>> {
    if let Some(game) = state.generator.find_game(&id) {
        if !game.has_result() {
            return Err(ServiceError::NotPossible("Game has not started yet".to_string()));
        }
        return Ok(Json(state.generator.player_stats_for(&game)));
    }

    match (roster.home.as_deref(), roster.away.as_deref()) {
        (Some(home), Some(away)) if !home.is_empty() && !away.is_empty() => {
            Ok(Json(state.generator.player_stats(&id, home, away)))
        }
        _ => Err(ServiceError::NotFound(format!(
            "Game '{id}' not found; pass home and away team abbreviations"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(
            parse_date("2026-01-31"),
            Ok(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap())
        );
        assert_eq!(
            parse_date("31/01/2026"),
            Err(ServiceError::BadRequest(INVALID_DATE_MESSAGE.to_string()))
        );
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn not_possible_maps_to_bad_request() {
        let response = ServiceError::NotPossible("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let response = ServiceError::NotFound("gone".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
