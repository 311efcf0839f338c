use crate::app::MenuItem;
use crate::state::storage::Vote;
use chrono::{Days, NaiveDate};
use nba_api::{Game, GamePlayerStats, GameScores, PlayerStats};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Schedule state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ScheduleState {
    pub date: NaiveDate,
    pub games: Vec<Game>,
    pub selected: usize,
    /// False until the first schedule for `date` arrives.
    pub loaded: bool,
}

impl ScheduleState {
    pub fn new(date: NaiveDate) -> Self {
        Self { date, ..Self::default() }
    }

    /// Switch to `date`; the games arrive later through `load`.
    pub fn set_date(&mut self, date: NaiveDate) {
        if self.date != date {
            self.date = date;
            self.games.clear();
            self.selected = 0;
            self.loaded = false;
        }
    }

    pub fn next_day(&mut self) -> NaiveDate {
        let next = self.date.checked_add_days(Days::new(1)).unwrap_or(self.date);
        self.set_date(next);
        next
    }

    pub fn previous_day(&mut self) -> NaiveDate {
        let previous = self.date.checked_sub_days(Days::new(1)).unwrap_or(self.date);
        self.set_date(previous);
        previous
    }

    /// Store a schedule for `date`. Responses for any other date are stale and
    /// dropped. A refresh keeps the selection on the same game.
    pub fn load(&mut self, date: NaiveDate, games: Vec<Game>) -> bool {
        if date != self.date {
            return false;
        }
        let selected_id = self.selected_game().map(|g| g.id.clone());
        self.games = games;
        self.selected = selected_id
            .and_then(|id| self.games.iter().position(|g| g.id == id))
            .unwrap_or(0);
        self.loaded = true;
        true
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.games.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_game(&self) -> Option<&Game> {
        self.games.get(self.selected)
    }

    pub fn game(&self, game_id: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.id == game_id)
    }
}

// ---------------------------------------------------------------------------
// Rating
// ---------------------------------------------------------------------------

/// Neutral score a vote moves around; an upvote counts as 5.5, a downvote 4.5.
const NEUTRAL_RATING: f64 = 5.0;
const VOTE_WEIGHT: f64 = 0.5;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rating {
    pub average: f64,
    pub votes: u32,
    pub user_vote: Option<Vote>,
}

impl Rating {
    /// Rating as remembered across restarts: only the user's own vote persists.
    pub fn restored(user_vote: Option<Vote>) -> Self {
        Self { user_vote, ..Self::default() }
    }

    pub fn has_voted(&self) -> bool {
        self.user_vote.is_some()
    }

    /// Cast the one vote allowed per game. Returns false when already voted.
    pub fn cast(&mut self, vote: Vote) -> bool {
        if self.has_voted() {
            return false;
        }
        let adjustment = match vote {
            Vote::Up => VOTE_WEIGHT,
            Vote::Down => -VOTE_WEIGHT,
        };
        let votes = self.votes + 1;
        self.average =
            (self.average * f64::from(self.votes) + NEUTRAL_RATING + adjustment) / f64::from(votes);
        self.votes = votes;
        self.user_vote = Some(vote);
        true
    }

    /// One decimal, or a dash while nobody has rated the game.
    pub fn label(&self) -> String {
        if self.average > 0.0 {
            format!("{:.1}", self.average)
        } else {
            "—".to_string()
        }
    }

    pub fn tier(&self) -> RatingTier {
        if self.average >= 7.0 {
            RatingTier::High
        } else if self.average >= 5.0 {
            RatingTier::Middling
        } else {
            RatingTier::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    High,
    Middling,
    Low,
}

// ---------------------------------------------------------------------------
// Game detail state
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TeamSide {
    #[default]
    Away,
    Home,
}

impl TeamSide {
    pub fn toggle(self) -> Self {
        match self {
            TeamSide::Away => TeamSide::Home,
            TeamSide::Home => TeamSide::Away,
        }
    }
}

#[derive(Debug, Default)]
pub struct GameDetailState {
    pub game_id: Option<String>,
    pub stats: Option<GamePlayerStats>,
    pub side: TeamSide,
    pub selected_player: usize,
    pub ratings: HashMap<String, Rating>,
}

impl GameDetailState {
    pub fn open(&mut self, game_id: &str) {
        if self.game_id.as_deref() != Some(game_id) {
            self.game_id = Some(game_id.to_string());
            self.stats = None;
            self.side = TeamSide::Away;
            self.selected_player = 0;
        }
    }

    pub fn load(&mut self, stats: GamePlayerStats) -> bool {
        if self.game_id.as_deref() != Some(stats.game_id.as_str()) {
            return false;
        }
        self.stats = Some(stats);
        self.selected_player = self.selected_player.min(self.roster().len().saturating_sub(1));
        true
    }

    pub fn roster(&self) -> &[PlayerStats] {
        match (&self.stats, self.side) {
            (Some(stats), TeamSide::Away) => &stats.away_team_stats,
            (Some(stats), TeamSide::Home) => &stats.home_team_stats,
            (None, _) => &[],
        }
    }

    pub fn player_down(&mut self) {
        if self.selected_player + 1 < self.roster().len() {
            self.selected_player += 1;
        }
    }

    pub fn player_up(&mut self) {
        self.selected_player = self.selected_player.saturating_sub(1);
    }

    pub fn switch_side(&mut self) {
        self.side = self.side.toggle();
        self.selected_player = 0;
    }
}

// ---------------------------------------------------------------------------
// Spoiler confirmation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpoilerPrompt {
    pub game_id: String,
    pub matchup: String,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub schedule: ScheduleState,
    /// Scores fetched for revealed games, keyed by game id.
    pub scores: HashMap<String, GameScores>,
    pub detail: GameDetailState,
    pub spoiler_prompt: Option<SpoilerPrompt>,
}

impl AppState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            schedule: ScheduleState::new(date),
            ..Self::default()
        }
    }
}
