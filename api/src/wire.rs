//! JSON envelopes exchanged between the HTTP service and the client.
use crate::{Game, GameScores};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const INVALID_DATE_MESSAGE: &str = "Invalid date format. Use YYYY-MM-DD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamesResponse {
    pub games: Vec<Game>,
    pub date: String,
    pub count: usize,
}

impl GamesResponse {
    pub fn new(date: String, games: Vec<Game>) -> Self {
        Self { count: games.len(), games, date }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoresResponse {
    pub game_id: String,
    pub scores: GameScores,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GamesQuery {
    pub date: Option<String>,
}

/// Team abbreviations for box scores of games that are not on a generated schedule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterQuery {
    pub home: Option<String>,
    pub away: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
