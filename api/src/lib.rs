pub mod catalog;
pub mod client;
pub mod clock;
pub mod mock;
pub mod server;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Domain types shared by the generator, the HTTP service and the client
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,         // "Boston Celtics"
    pub abbreviation: String, // "BOS"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,          // "game-2026-01-31-0"
    pub external_id: String, // "nba-2026-01-31-BOS-LAL"
    pub home_team: Team,
    pub away_team: Team,
    pub scheduled_time: DateTime<Utc>,
    pub status: GameStatus,
    pub venue: String,
    pub broadcasts: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    pub fn is_live(&self) -> bool {
        self.status == GameStatus::Live
    }

    /// Scheduled games have nothing to hide yet.
    pub fn has_result(&self) -> bool {
        self.status != GameStatus::Scheduled
    }

    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away_team.abbreviation, self.home_team.abbreviation)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Scheduled,
    Live,
    Final,
}

impl GameStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::Scheduled => "Upcoming",
            GameStatus::Live => "Live",
            GameStatus::Final => "Final",
        }
    }
}

/// The two states a game can be scored in. A scheduled game has no score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreState {
    Live,
    Final,
}

impl TryFrom<GameStatus> for ScoreState {
    type Error = GameStatus;

    fn try_from(status: GameStatus) -> Result<Self, Self::Error> {
        match status {
            GameStatus::Live => Ok(ScoreState::Live),
            GameStatus::Final => Ok(ScoreState::Final),
            GameStatus::Scheduled => Err(status),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
    #[serde(rename = "4th")]
    Fourth,
    #[serde(rename = "OT")]
    Overtime,
    Final,
}

impl Period {
    pub const REGULATION: [Period; 4] = [Period::First, Period::Second, Period::Third, Period::Fourth];

    pub fn label(&self) -> &'static str {
        match self {
            Period::First => "1st",
            Period::Second => "2nd",
            Period::Third => "3rd",
            Period::Fourth => "4th",
            Period::Overtime => "OT",
            Period::Final => "Final",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameScores {
    pub home_score: u16,
    pub away_score: u16,
    pub quarter: Period,
    /// "M:SS" left in the period; absent once the game is over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_remaining: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    /// Lineup order; slot `i` on a roster plays `ROTATION[i % 5]`.
    pub const ROTATION: [Position; 5] = [Position::PG, Position::SG, Position::SF, Position::PF, Position::C];

    pub fn is_guard(&self) -> bool {
        matches!(self, Position::PG | Position::SG)
    }

    pub fn is_big(&self) -> bool {
        matches!(self, Position::PF | Position::C)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player_id: String,
    pub player_name: String,
    pub jersey_number: String,
    pub position: Position,
    pub points: u16,
    pub rebounds: u16,
    pub assists: u16,
    pub steals: u16,
    pub blocks: u16,
    pub fouls: u16,
    pub minutes: String, // "34:21", "0:00" for DNP
    pub field_goals_made: u16,
    pub field_goals_attempted: u16,
    pub three_pointers_made: u16,
    pub three_pointers_attempted: u16,
    pub free_throws_made: u16,
    pub free_throws_attempted: u16,
}

impl PlayerStats {
    /// Whole minutes on the floor, the part of `minutes` before the colon.
    pub fn minutes_played(&self) -> u16 {
        self.minutes
            .split(':')
            .next()
            .and_then(|m| m.parse().ok())
            .unwrap_or(0)
    }

    pub fn did_not_play(&self) -> bool {
        self.minutes_played() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePlayerStats {
    pub game_id: String,
    pub home_team_stats: Vec<PlayerStats>,
    pub away_team_stats: Vec<PlayerStats>,
}

/// Shooting percentage to one decimal, "0.0" when nothing was attempted.
pub fn shooting_percentage(made: u16, attempted: u16) -> String {
    if attempted == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", f64::from(made) / f64::from(attempted) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&GameStatus::Live).unwrap(), "\"live\"");
        assert_eq!(
            serde_json::from_str::<GameStatus>("\"final\"").unwrap(),
            GameStatus::Final
        );
    }

    #[test]
    fn scheduled_games_cannot_be_scored() {
        assert_eq!(ScoreState::try_from(GameStatus::Live), Ok(ScoreState::Live));
        assert_eq!(ScoreState::try_from(GameStatus::Final), Ok(ScoreState::Final));
        assert!(ScoreState::try_from(GameStatus::Scheduled).is_err());
    }

    #[test]
    fn final_scores_omit_time_remaining() {
        let scores = GameScores {
            home_score: 118,
            away_score: 115,
            quarter: Period::Final,
            time_remaining: None,
        };
        let json = serde_json::to_value(&scores).unwrap();
        assert_eq!(json["quarter"], "Final");
        assert_eq!(json["homeScore"], 118);
        assert!(json.get("timeRemaining").is_none());
    }

    #[test]
    fn minutes_played_reads_whole_minutes() {
        let mut p = sample_player();
        p.minutes = "34:21".into();
        assert_eq!(p.minutes_played(), 34);
        p.minutes = "0:00".into();
        assert!(p.did_not_play());
    }

    #[test]
    fn shooting_percentage_handles_zero_attempts() {
        assert_eq!(shooting_percentage(0, 0), "0.0");
        assert_eq!(shooting_percentage(7, 12), "58.3");
        assert_eq!(shooting_percentage(5, 5), "100.0");
    }

    fn sample_player() -> PlayerStats {
        PlayerStats {
            player_id: "BOS-player-0".into(),
            player_name: "Jayson Tatum".into(),
            jersey_number: "0".into(),
            position: Position::SF,
            points: 0,
            rebounds: 0,
            assists: 0,
            steals: 0,
            blocks: 0,
            fouls: 0,
            minutes: "0:00".into(),
            field_goals_made: 0,
            field_goals_attempted: 0,
            three_pointers_made: 0,
            three_pointers_attempted: 0,
            free_throws_made: 0,
            free_throws_attempted: 0,
        }
    }
}
