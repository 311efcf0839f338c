use super::date_seed;
use crate::catalog::{TEAMS, TIP_OFF_SLOTS, broadcasts_at, team_at, venue_for};
use crate::{Game, GameStatus, Team};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Utc, Weekday};

/// League time is US Eastern, fixed at UTC-05:00.
pub const LEAGUE_UTC_OFFSET_HOURS: i64 = 5;

/// A game counts as live for this long after tip-off.
pub const GAME_LENGTH_HOURS: i64 = 3;

/// Calendar date of `instant` in league time.
pub fn league_date(instant: DateTime<Utc>) -> NaiveDate {
    (instant - TimeDelta::hours(LEAGUE_UTC_OFFSET_HOURS)).date_naive()
}

/// Number of games on `date`, between 2 and 9.
///
/// Tuesday, Wednesday, Friday and Saturday are busy nights, Thursday carries the
/// national TV doubleheader bump, Sunday and Monday are light.
pub fn game_count_for_date(date: NaiveDate) -> usize {
    let date_hash = (date.day() + date.month0()) as usize;
    match date.weekday() {
        Weekday::Thu => 6 + date_hash % 4,
        Weekday::Tue | Weekday::Wed | Weekday::Fri | Weekday::Sat => 5 + date_hash % 5,
        Weekday::Sun => 3 + date_hash % 3,
        Weekday::Mon => 2 + date_hash % 3,
    }
}

/// Home and away team of the `index`-th game on `date`. Never the same team.
pub fn team_pairing(date: NaiveDate, index: usize) -> (Team, Team) {
    let seed = date_seed(date, index);
    let team_count = TEAMS.len();
    let home = (seed % team_count as u64) as usize;
    let mut away = ((seed * 13 + index as u64) % team_count as u64) as usize;
    if away == home {
        away = (away + 1) % team_count;
    }
    (team_at(home), team_at(away))
}

/// Tip-off of the `index`-th game on `date`, rotating through the six slots.
pub fn tip_off(date: NaiveDate, index: usize) -> DateTime<Utc> {
    let (hour, minute) = TIP_OFF_SLOTS[index % TIP_OFF_SLOTS.len()];
    date.and_time(NaiveTime::MIN).and_utc()
        + TimeDelta::minutes(i64::from(hour * 60 + minute))
        + TimeDelta::hours(LEAGUE_UTC_OFFSET_HOURS)
}

/// Status of a game tipping off at `scheduled` as seen at `now`.
/// Live starts exactly at tip-off, final exactly three hours later.
pub fn game_status(scheduled: DateTime<Utc>, now: DateTime<Utc>) -> GameStatus {
    if now < scheduled {
        GameStatus::Scheduled
    } else if now < scheduled + TimeDelta::hours(GAME_LENGTH_HOURS) {
        GameStatus::Live
    } else {
        GameStatus::Final
    }
}

/// Split a schedule id (`game-YYYY-MM-DD-i`) into its date and index.
pub fn parse_game_id(game_id: &str) -> Option<(NaiveDate, usize)> {
    let rest = game_id.strip_prefix("game-")?;
    let (date, index) = rest.rsplit_once('-')?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let index = index.parse().ok()?;
    Some((date, index))
}

/// All games on `date`, sorted by tip-off.
pub fn generate_schedule(date: NaiveDate, now: DateTime<Utc>) -> Vec<Game> {
    let iso_date = date.format("%Y-%m-%d").to_string();
    let created_at = date.and_time(NaiveTime::MIN).and_utc() - TimeDelta::days(1);

    let mut games: Vec<Game> = (0..game_count_for_date(date))
        .map(|i| {
            let (home, away) = team_pairing(date, i);
            let scheduled_time = tip_off(date, i);
            Game {
                id: format!("game-{iso_date}-{i}"),
                external_id: format!("nba-{iso_date}-{}-{}", home.abbreviation, away.abbreviation),
                venue: venue_for(&home),
                broadcasts: broadcasts_at(date.day() as usize + i),
                status: game_status(scheduled_time, now),
                home_team: home,
                away_team: away,
                scheduled_time,
                created_at,
                updated_at: now,
            }
        })
        .collect();

    games.sort_by_key(|g| g.scheduled_time);
    games
}

/// Every game from `start` through `end` inclusive, day by day.
pub fn generate_historical_games(start: NaiveDate, end: NaiveDate, now: DateTime<Utc>) -> Vec<Game> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .flat_map(|day| generate_schedule(day, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon(d: NaiveDate) -> DateTime<Utc> {
        d.and_hms_opt(12, 0, 0).unwrap().and_utc()
    }

    #[test]
    fn saturday_example_has_five_to_nine_games() {
        let saturday = date(2026, 1, 31);
        assert_eq!(saturday.weekday(), Weekday::Sat);
        // dateHash = 31 + 0
        assert_eq!(game_count_for_date(saturday), 6);
        assert_eq!(generate_schedule(saturday, noon(saturday)).len(), 6);
    }

    #[test]
    fn game_counts_stay_in_weekday_ranges() {
        for day in date(2025, 10, 1).iter_days().take(400) {
            let count = game_count_for_date(day);
            let range = match day.weekday() {
                Weekday::Thu => 6..=9,
                Weekday::Tue | Weekday::Wed | Weekday::Fri | Weekday::Sat => 5..=9,
                Weekday::Sun => 3..=5,
                Weekday::Mon => 2..=4,
            };
            assert!(range.contains(&count), "{day}: {count} games");
        }
    }

    #[test]
    fn first_pairing_of_the_saturday_example() {
        let (home, away) = team_pairing(date(2026, 1, 31), 0);
        assert_eq!(home.abbreviation, "CHA");
        assert_eq!(away.abbreviation, "PHX");
    }

    #[test]
    fn teams_never_play_themselves() {
        for day in date(2024, 1, 1).iter_days().take(800) {
            for i in 0..game_count_for_date(day) {
                let (home, away) = team_pairing(day, i);
                assert_ne!(home.id, away.id, "{day} game {i}");
            }
        }
    }

    #[test]
    fn schedule_ids_are_unique_and_sorted() {
        for day in date(2026, 1, 1).iter_days().take(60) {
            let games = generate_schedule(day, noon(day));
            let ids: HashSet<_> = games.iter().map(|g| g.id.as_str()).collect();
            assert_eq!(ids.len(), games.len());
            assert!(games.windows(2).all(|w| w[0].scheduled_time <= w[1].scheduled_time));
        }
    }

    #[test]
    fn schedule_is_deterministic() {
        let day = date(2026, 3, 12);
        let now = noon(day);
        assert_eq!(generate_schedule(day, now), generate_schedule(day, now));
    }

    #[test]
    fn game_fields_follow_the_catalog() {
        let day = date(2026, 1, 31);
        let games = generate_schedule(day, noon(day));
        let first = games.iter().find(|g| g.id == "game-2026-01-31-0").unwrap();
        assert_eq!(first.external_id, "nba-2026-01-31-CHA-PHX");
        assert_eq!(first.venue, "Spectrum Center");
        assert_eq!(first.broadcasts, vec!["League Pass".to_string()]);
        assert_eq!(first.created_at, Utc.with_ymd_and_hms(2026, 1, 30, 0, 0, 0).unwrap());
        assert_eq!(first.updated_at, noon(day));
    }

    #[test]
    fn tip_off_slots_are_eastern_evening_times() {
        let day = date(2026, 1, 31);
        assert_eq!(tip_off(day, 0), Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(tip_off(day, 5), Utc.with_ymd_and_hms(2026, 2, 1, 3, 30, 0).unwrap());
        assert_eq!(tip_off(day, 6), tip_off(day, 0));
    }

    #[test]
    fn status_boundaries() {
        let tip = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let ms = TimeDelta::milliseconds(1);
        let three_hours = TimeDelta::hours(3);
        assert_eq!(game_status(tip, tip - ms), GameStatus::Scheduled);
        assert_eq!(game_status(tip, tip), GameStatus::Live);
        assert_eq!(game_status(tip, tip + three_hours - ms), GameStatus::Live);
        assert_eq!(game_status(tip, tip + three_hours), GameStatus::Final);
    }

    #[test]
    fn statuses_flip_as_the_evening_goes_on() {
        let day = date(2026, 1, 31);
        let before = generate_schedule(day, noon(day));
        assert!(before.iter().all(|g| g.status == GameStatus::Scheduled));

        let next_morning = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        let after = generate_schedule(day, next_morning);
        assert!(after.iter().all(|g| g.status == GameStatus::Final));

        // 20:15 ET: the 19:00 and 19:30 games are on, the late games are not.
        let mid = Utc.with_ymd_and_hms(2026, 2, 1, 1, 15, 0).unwrap();
        let during = generate_schedule(day, mid);
        assert!(during.iter().any(|g| g.status == GameStatus::Live));
        assert!(during.iter().any(|g| g.status == GameStatus::Scheduled));
    }

    #[test]
    fn parse_game_id_accepts_schedule_ids_only() {
        assert_eq!(parse_game_id("game-2026-01-31-4"), Some((date(2026, 1, 31), 4)));
        assert_eq!(parse_game_id("game-3"), None);
        assert_eq!(parse_game_id("nba-2026-01-31-4"), None);
        assert_eq!(parse_game_id("game-2026-13-01-0"), None);
        assert_eq!(parse_game_id("game-2026-01-31-x"), None);
    }

    #[test]
    fn historical_games_span_the_inclusive_range() {
        let start = date(2026, 1, 29);
        let end = date(2026, 1, 31);
        let now = noon(end);
        let expected: usize = start
            .iter_days()
            .take(3)
            .map(game_count_for_date)
            .sum();
        assert_eq!(generate_historical_games(start, end, now).len(), expected);
        assert!(generate_historical_games(end, start, now).is_empty());
    }

    #[test]
    fn league_date_lags_utc_by_five_hours() {
        let late = Utc.with_ymd_and_hms(2026, 2, 1, 4, 59, 59).unwrap();
        assert_eq!(league_date(late), date(2026, 1, 31));
        let morning = Utc.with_ymd_and_hms(2026, 2, 1, 5, 0, 0).unwrap();
        assert_eq!(league_date(morning), date(2026, 2, 1));
    }
}
