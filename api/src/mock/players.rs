use super::string_seed;
use crate::{GamePlayerStats, PlayerStats, Position};

pub const ROSTER_SIZE: usize = 12;
const STARTERS: usize = 5;

/// Offset applied to the away roster so the two sides do not mirror each other.
const AWAY_SEED_OFFSET: u64 = 1000;

const PLAYER_NAMES: [&str; 32] = [
    "LeBron James",
    "Stephen Curry",
    "Kevin Durant",
    "Giannis Antetokounmpo",
    "Nikola Jokic",
    "Luka Doncic",
    "Joel Embiid",
    "Jayson Tatum",
    "Damian Lillard",
    "Anthony Davis",
    "Jimmy Butler",
    "Kawhi Leonard",
    "Devin Booker",
    "Ja Morant",
    "Trae Young",
    "Donovan Mitchell",
    "Karl-Anthony Towns",
    "Zion Williamson",
    "Bam Adebayo",
    "Domantas Sabonis",
    "De'Aaron Fox",
    "Tyrese Haliburton",
    "Paolo Banchero",
    "Victor Wembanyama",
    "Shai Gilgeous-Alexander",
    "Jaylen Brown",
    "Kyrie Irving",
    "Paul George",
    "Bradley Beal",
    "DeMar DeRozan",
    "Julius Randle",
    "Jalen Brunson",
];

const JERSEY_NUMBERS: [u8; 16] = [23, 30, 35, 7, 11, 3, 21, 0, 1, 13, 2, 15, 24, 34, 22, 5];

/// Box score for both sides of `game_id`, each roster sorted by minutes then points.
pub fn generate_player_stats(game_id: &str, home_abbr: &str, away_abbr: &str) -> GamePlayerStats {
    let seed = string_seed(game_id);
    GamePlayerStats {
        game_id: game_id.to_string(),
        home_team_stats: roster(seed, home_abbr),
        away_team_stats: roster(seed + AWAY_SEED_OFFSET, away_abbr),
    }
}

fn roster(seed: u64, team_abbr: &str) -> Vec<PlayerStats> {
    let mut players: Vec<PlayerStats> = (0..ROSTER_SIZE)
        .map(|index| player_line(seed, index, team_abbr))
        .collect();
    players.sort_by(|a, b| {
        b.minutes_played()
            .cmp(&a.minutes_played())
            .then_with(|| b.points.cmp(&a.points))
    });
    players
}

/// Minutes and seconds on the floor. Bench slots sit out one time in three.
fn playing_time(slot_seed: u64, is_starter: bool) -> (u64, u64) {
    if !is_starter && slot_seed % 3 == 0 {
        return (0, 0);
    }
    let minutes = if is_starter { 25 + slot_seed % 15 } else { 10 + slot_seed % 18 };
    (minutes, (slot_seed * 7) % 60)
}

fn floor_u16(value: f64) -> u16 {
    value.floor() as u16
}

/// One player's line. The slot seed picks identity and minutes; the team seed
/// shapes the counting stats, scaled by the share of a 36-minute game played.
fn player_line(seed: u64, index: usize, team_abbr: &str) -> PlayerStats {
    let slot_seed = seed + index as u64;
    let position = Position::ROTATION[index % Position::ROTATION.len()];
    let (minutes, seconds) = playing_time(slot_seed, index < STARTERS);
    let share = minutes as f64 / 36.0;
    let m = |n: u64| n as f64;

    let base_points = match position {
        Position::PG | Position::SG => 18.0,
        Position::SF => 16.0,
        Position::PF | Position::C => 12.0,
    };
    let points = floor_u16(base_points * share + m(seed % 10));

    let fg_attempted = floor_u16(f64::from(points) * 0.8 + m(seed % 5));
    let fg_made = floor_u16(f64::from(fg_attempted) * (0.4 + m(seed % 20) / 100.0));

    let three_attempted = if position.is_guard() {
        floor_u16(f64::from(fg_attempted) * 0.4 + m(seed % 3))
    } else {
        floor_u16(f64::from(fg_attempted) * 0.2 + m(seed % 2))
    };
    let three_made = floor_u16(f64::from(three_attempted) * (0.3 + m(seed % 15) / 100.0));

    let ft_attempted = floor_u16(f64::from(points) * 0.3 + m(seed % 4));
    let ft_made = floor_u16(f64::from(ft_attempted) * (0.75 + m(seed % 20) / 100.0));

    let base_rebounds = match position {
        Position::C => 10.0,
        Position::PF => 8.0,
        _ => 4.0,
    };
    let rebounds = floor_u16(base_rebounds * share + m(seed % 4));

    let base_assists = match position {
        Position::PG => 8.0,
        Position::SG => 4.0,
        _ => 2.0,
    };
    let assists = floor_u16(base_assists * share + m(seed % 3));

    let steals = floor_u16(m(seed % 3) * share);
    let blocks = if position.is_big() {
        floor_u16(m(seed % 3) * share)
    } else {
        floor_u16(m(seed % 2) * share)
    };
    let fouls = floor_u16(m(seed % 5) * share).min(6);

    PlayerStats {
        player_id: format!("{team_abbr}-player-{index}"),
        player_name: PLAYER_NAMES[(slot_seed % PLAYER_NAMES.len() as u64) as usize].to_string(),
        jersey_number: JERSEY_NUMBERS[(slot_seed % JERSEY_NUMBERS.len() as u64) as usize].to_string(),
        position,
        points,
        rebounds,
        assists,
        steals,
        blocks,
        fouls,
        minutes: format!("{minutes}:{seconds:02}"),
        field_goals_made: fg_made,
        field_goals_attempted: fg_attempted,
        three_pointers_made: three_made,
        three_pointers_attempted: three_attempted,
        free_throws_made: ft_made,
        free_throws_attempted: ft_attempted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn twelve_players_per_side() {
        let stats = generate_player_stats("game-2026-01-31-0", "CHA", "PHX");
        assert_eq!(stats.game_id, "game-2026-01-31-0");
        assert_eq!(stats.home_team_stats.len(), ROSTER_SIZE);
        assert_eq!(stats.away_team_stats.len(), ROSTER_SIZE);
        assert!(stats.home_team_stats.iter().all(|p| p.player_id.starts_with("CHA-player-")));
        assert!(stats.away_team_stats.iter().all(|p| p.player_id.starts_with("PHX-player-")));
    }

    #[test]
    fn fouls_never_exceed_six() {
        for i in 0..300 {
            let stats = generate_player_stats(&format!("game-{i}"), "BOS", "LAL");
            for p in stats.home_team_stats.iter().chain(&stats.away_team_stats) {
                assert!(p.fouls <= 6, "{} fouled out with {}", p.player_id, p.fouls);
            }
        }
    }

    #[test]
    fn rosters_sort_by_minutes_then_points() {
        for i in 0..100 {
            let stats = generate_player_stats(&format!("game-2026-02-0{}-{i}", i % 9 + 1), "NYK", "MIA");
            for team in [&stats.home_team_stats, &stats.away_team_stats] {
                for pair in team.windows(2) {
                    let (a, b) = (&pair[0], &pair[1]);
                    assert!(a.minutes_played() >= b.minutes_played());
                    if a.minutes_played() == b.minutes_played() {
                        assert!(a.points >= b.points);
                    }
                }
            }
        }
    }

    #[test]
    fn stats_are_deterministic() {
        assert_eq!(
            generate_player_stats("game-3", "GSW", "MIA"),
            generate_player_stats("game-3", "GSW", "MIA")
        );
    }

    #[test]
    fn player_ids_cover_every_slot() {
        let stats = generate_player_stats("game-3", "GSW", "MIA");
        let ids: HashSet<_> = stats.home_team_stats.iter().map(|p| p.player_id.clone()).collect();
        let expected: HashSet<_> = (0..ROSTER_SIZE).map(|i| format!("GSW-player-{i}")).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn starters_log_heavy_minutes() {
        for slot_seed in 0..100 {
            let (minutes, seconds) = playing_time(slot_seed, true);
            assert!((25..40).contains(&minutes));
            assert!(seconds < 60);
        }
    }

    #[test]
    fn bench_sits_out_on_multiples_of_three() {
        assert_eq!(playing_time(9, false), (0, 0));
        assert_eq!(playing_time(10, false), (20, 10));
        // starters always play
        assert_ne!(playing_time(9, true).0, 0);
    }

    #[test]
    fn known_line_for_short_id() {
        // seed 506, slot 0 plays PG: 25 + 506 % 15 = 36 minutes, (506 * 7) % 60 = 2 seconds
        let line = player_line(506, 0, "GSW");
        assert_eq!(line.minutes, "36:02");
        assert_eq!(line.position, Position::PG);
        // 18 * 1.0 + 506 % 10
        assert_eq!(line.points, 24);
        // 24 * 0.8 + 506 % 5 = 20.2
        assert_eq!(line.field_goals_attempted, 20);
        // 20 * (0.4 + 6 / 100) = 9.2
        assert_eq!(line.field_goals_made, 9);
        // 8 * 1.0 + 506 % 3
        assert_eq!(line.assists, 10);
        assert_eq!(line.player_name, PLAYER_NAMES[506 % 32]);
        assert_eq!(line.jersey_number, JERSEY_NUMBERS[506 % 16].to_string());
    }

    #[test]
    fn made_shots_never_exceed_attempts() {
        for i in 0..200 {
            let stats = generate_player_stats(&format!("game-x-{i}"), "DEN", "UTA");
            for p in stats.home_team_stats.iter().chain(&stats.away_team_stats) {
                assert!(p.field_goals_made <= p.field_goals_attempted);
                assert!(p.three_pointers_made <= p.three_pointers_attempted);
                assert!(p.free_throws_made <= p.free_throws_attempted);
            }
        }
    }
}
