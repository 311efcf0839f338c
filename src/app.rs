use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, Rating, SpoilerPrompt};
use crate::state::storage::{LocalStore, Vote};
use chrono::{NaiveDate, Utc};
use log::{debug, error, info, warn};
use nba_api::mock::league_date;
use nba_api::{Game, GamePlayerStats, GameScores, GameStatus, Period};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Schedule,
    GameDetail,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    pub store: LocalStore,
}

/// Today in league time.
pub fn today() -> NaiveDate {
    league_date(Utc::now())
}

impl App {
    pub fn new(start_date: Option<NaiveDate>) -> Self {
        let settings = AppSettings {
            start_date,
            ..AppSettings::load()
        };
        let store = match LocalStore::open(&settings.storage_path) {
            Ok(store) => store,
            Err(e) => {
                error!("{e}; reveals and votes will not be saved");
                LocalStore::in_memory()
            }
        };

        match store.path() {
            Some(path) => debug!("reveals and votes stored in {}", path.display()),
            None => debug!("reveals and votes kept in memory"),
        }

        if let Some(level) = settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        Self::with_store(settings, store)
    }

    pub fn with_store(settings: AppSettings, store: LocalStore) -> Self {
        let date = settings.start_date.unwrap_or_else(today);
        Self {
            state: AppState::new(date),
            settings,
            store,
        }
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    /// Store the schedule and return the revealed games whose scores need
    /// fetching: live games, and finished ones without a final score yet.
    pub fn on_schedule_loaded(&mut self, date: NaiveDate, games: Vec<Game>) -> Vec<Game> {
        if !self.state.schedule.load(date, games) {
            return Vec::new();
        }
        self.state.last_error = None;
        self.state
            .schedule
            .games
            .iter()
            .filter(|g| self.is_revealed(g) && self.needs_scores(g))
            .cloned()
            .collect()
    }

    fn needs_scores(&self, game: &Game) -> bool {
        match (game.status, self.state.scores.get(&game.id)) {
            (GameStatus::Live, _) | (_, None) => true,
            // fetched while the game was still in progress
            (GameStatus::Final, Some(scores)) => scores.quarter != Period::Final,
            (GameStatus::Scheduled, Some(_)) => false,
        }
    }

    pub fn on_scores_loaded(&mut self, game_id: String, scores: GameScores) {
        // Hidden while the request was in flight.
        if !self.store.is_revealed(&game_id) {
            return;
        }
        self.state.scores.insert(game_id, scores);
    }

    pub fn on_player_stats_loaded(&mut self, stats: GamePlayerStats) {
        if self.store.is_revealed(&stats.game_id) {
            self.state.last_error = None;
            self.state.detail.load(stats);
        }
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Schedule navigation
    // -----------------------------------------------------------------------

    pub fn next_day(&mut self) -> NaiveDate {
        self.state.schedule.next_day()
    }

    pub fn previous_day(&mut self) -> NaiveDate {
        self.state.schedule.previous_day()
    }

    pub fn jump_to(&mut self, date: NaiveDate) -> NaiveDate {
        self.state.schedule.set_date(date);
        date
    }

    pub fn select_next_game(&mut self) {
        self.state.schedule.select_next();
    }

    pub fn select_previous_game(&mut self) {
        self.state.schedule.select_previous();
    }

    /// Game under the cursor: the detail view's game, else the schedule selection.
    pub fn focused_game(&self) -> Option<&Game> {
        if self.state.active_tab == MenuItem::GameDetail
            && let Some(id) = self.state.detail.game_id.as_deref()
        {
            return self.state.schedule.game(id);
        }
        self.state.schedule.selected_game()
    }

    pub fn is_revealed(&self, game: &Game) -> bool {
        game.has_result() && self.store.is_revealed(&game.id)
    }

    pub fn scores_for(&self, game: &Game) -> Option<&GameScores> {
        if !self.is_revealed(game) {
            return None;
        }
        self.state.scores.get(&game.id)
    }

    // -----------------------------------------------------------------------
    // Reveal flow
    // -----------------------------------------------------------------------

    /// Ask for confirmation before showing the focused game's score.
    pub fn request_reveal(&mut self) {
        let Some(game) = self.focused_game() else {
            return;
        };
        if !game.has_result() {
            info!("{} has not tipped off; nothing to reveal", game.matchup());
            return;
        }
        if self.store.is_revealed(&game.id) {
            return;
        }
        self.state.spoiler_prompt = Some(SpoilerPrompt {
            game_id: game.id.clone(),
            matchup: game.matchup(),
        });
    }

    /// Persist the reveal and return the game whose scores should be fetched.
    pub fn confirm_reveal(&mut self) -> Option<Game> {
        let prompt = self.state.spoiler_prompt.take()?;
        let game = self.state.schedule.game(&prompt.game_id)?.clone();
        if let Err(e) = self.store.set_revealed(&game.id, true) {
            warn!("could not persist reveal of {}: {e}", game.id);
        }
        Some(game)
    }

    pub fn cancel_reveal(&mut self) {
        self.state.spoiler_prompt = None;
    }

    /// Hide the focused game's score again and forget what was fetched.
    pub fn hide_scores(&mut self) {
        let Some(game_id) = self.focused_game().map(|g| g.id.clone()) else {
            return;
        };
        if let Err(e) = self.store.set_revealed(&game_id, false) {
            warn!("could not persist hiding {game_id}: {e}");
        }
        self.state.scores.remove(&game_id);
        if self.state.detail.game_id.as_deref() == Some(game_id.as_str()) {
            self.state.detail.stats = None;
        }
    }

    // -----------------------------------------------------------------------
    // Detail view
    // -----------------------------------------------------------------------

    /// Open the selected game. Returns it when its box score should be loaded.
    pub fn open_detail(&mut self) -> Option<Game> {
        let game = self.state.schedule.selected_game()?.clone();
        self.state.detail.open(&game.id);
        let saved_vote = self.store.vote(&game.id);
        self.state
            .detail
            .ratings
            .entry(game.id.clone())
            .or_insert_with(|| Rating::restored(saved_vote));
        self.update_tab(MenuItem::GameDetail);
        self.is_revealed(&game).then_some(game)
    }

    pub fn close_detail(&mut self) {
        self.update_tab(MenuItem::Schedule);
    }

    pub fn rating_for(&self, game_id: &str) -> Rating {
        self.state
            .detail
            .ratings
            .get(game_id)
            .copied()
            .unwrap_or_else(|| Rating::restored(self.store.vote(game_id)))
    }

    /// Rate the focused game. One vote per game, remembered across restarts.
    pub fn vote(&mut self, vote: Vote) {
        let Some(game_id) = self.focused_game().map(|g| g.id.clone()) else {
            return;
        };
        let mut rating = self.rating_for(&game_id);
        if !rating.cast(vote) {
            return;
        }
        self.state.detail.ratings.insert(game_id.clone(), rating);
        if let Err(e) = self.store.record_vote(&game_id, vote) {
            warn!("could not persist vote on {game_id}: {e}");
        }
    }
}
