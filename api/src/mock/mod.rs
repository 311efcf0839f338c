//! Deterministic mock league data.
//!
//! Every value is derived from a date or a game id through plain arithmetic, so
//! the same inputs always rebuild the same schedule, score and box score. The
//! only ambient input is the clock, read once per call to classify status.

mod players;
mod schedule;
mod scores;

pub use players::{ROSTER_SIZE, generate_player_stats};
pub use schedule::{
    GAME_LENGTH_HOURS, LEAGUE_UTC_OFFSET_HOURS, game_count_for_date, game_status,
    generate_historical_games, generate_schedule, league_date, parse_game_id, team_pairing,
    tip_off,
};
pub use scores::generate_scores;

use crate::clock::{Clock, SystemClock};
use crate::{Game, GamePlayerStats, GameScores, ScoreState};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::fmt;
use std::sync::Arc;

/// Seed of a string: the sum of its UTF-16 code units.
pub fn string_seed(value: &str) -> u64 {
    value.encode_utf16().map(u64::from).sum()
}

/// Seed of the `index`-th game on `date`. The month is zero-based.
pub fn date_seed(date: NaiveDate, index: usize) -> u64 {
    u64::from(date.year().unsigned_abs()) * 10_000
        + u64::from(date.month0()) * 100
        + u64::from(date.day())
        + index as u64 * 17
}

/// Generator bound to a clock.
#[derive(Clone)]
pub struct MockGenerator {
    clock: Arc<dyn Clock>,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl fmt::Debug for MockGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockGenerator").finish_non_exhaustive()
    }
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self { clock: Arc::new(clock) }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Today's date in league time.
    pub fn today(&self) -> NaiveDate {
        league_date(self.clock.now())
    }

    pub fn schedule(&self, date: NaiveDate) -> Vec<Game> {
        generate_schedule(date, self.clock.now())
    }

    pub fn historical_games(&self, start: NaiveDate, end: NaiveDate) -> Vec<Game> {
        generate_historical_games(start, end, self.clock.now())
    }

    /// Rebuild the schedule that owns `game_id` and pick the game out of it.
    pub fn find_game(&self, game_id: &str) -> Option<Game> {
        let (date, _) = parse_game_id(game_id)?;
        self.schedule(date).into_iter().find(|g| g.id == game_id)
    }

    pub fn scores(&self, game_id: &str, state: ScoreState) -> GameScores {
        generate_scores(game_id, state)
    }

    /// Scores for a game in its current state, `None` before tip-off.
    pub fn scores_for(&self, game: &Game) -> Option<GameScores> {
        let state = ScoreState::try_from(game.status).ok()?;
        Some(generate_scores(&game.id, state))
    }

    pub fn player_stats(&self, game_id: &str, home_abbr: &str, away_abbr: &str) -> GamePlayerStats {
        generate_player_stats(game_id, home_abbr, away_abbr)
    }

    pub fn player_stats_for(&self, game: &Game) -> GamePlayerStats {
        generate_player_stats(
            &game.id,
            &game.home_team.abbreviation,
            &game.away_team.abbreviation,
        )
    }
}
