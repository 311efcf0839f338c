use crate::state::network::LoadingState;
use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use nba_api::{Game, GamePlayerStats, GameScores};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadSchedule { date: NaiveDate },
    /// Reload whatever date was loaded last.
    RefreshSchedule,
    LoadScores { game: Game },
    LoadPlayerStats { game: Game },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    ScheduleLoaded { date: NaiveDate, games: Vec<Game> },
    ScoresLoaded { game_id: String, scores: GameScores },
    PlayerStatsLoaded { stats: GamePlayerStats },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
