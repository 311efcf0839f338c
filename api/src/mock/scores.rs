use super::string_seed;
use crate::{GameScores, Period, ScoreState};

/// Score line for `game_id`. Same id and state, same scores.
pub fn generate_scores(game_id: &str, state: ScoreState) -> GameScores {
    let seed = string_seed(game_id);

    // Final scores land in the 95..=143 range.
    let base_score = 95 + seed % 30;
    let score_diff = (seed * 7) % 20;

    let (home_score, away_score) = if seed % 2 == 0 {
        (base_score + score_diff, base_score)
    } else {
        (base_score, base_score + score_diff)
    };

    match state {
        ScoreState::Final => GameScores {
            home_score: home_score as u16,
            away_score: away_score as u16,
            quarter: Period::Final,
            time_remaining: None,
        },
        ScoreState::Live => {
            let minutes_left = (seed * 11) % 12;
            let seconds_left = (seed * 13) % 60;
            GameScores {
                // 70% of the final line, rounded down.
                home_score: (home_score * 7 / 10) as u16,
                away_score: (away_score * 7 / 10) as u16,
                quarter: Period::REGULATION[((seed * 3) % 4) as usize],
                time_remaining: Some(format!("{minutes_left}:{seconds_left:02}")),
            }
        }
    }
}
