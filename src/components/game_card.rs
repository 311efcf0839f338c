use chrono::TimeDelta;
use nba_api::mock::LEAGUE_UTC_OFFSET_HOURS;
use nba_api::{Game, GameScores, GameStatus, Team};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

/// Rows one card takes, borders included.
pub const CARD_HEIGHT: u16 = 7;

pub struct GameCard<'a> {
    pub game: &'a Game,
    pub scores: Option<&'a GameScores>,
    pub revealed: bool,
    pub selected: bool,
}

impl Widget for GameCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.selected { Color::Yellow } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(Line::from(vec![
                Span::raw(" "),
                status_badge(self.game.status),
                Span::raw(format!(" {} ", tip_off_label(self.game))),
            ]));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let scores = if self.revealed { self.scores } else { None };
        let lines = vec![
            team_line(&self.game.away_team, "away", scores.map(|s| s.away_score)),
            team_line(&self.game.home_team, "home", scores.map(|s| s.home_score)),
            Line::from(Span::styled(
                venue_line(self.game),
                Style::default().fg(Color::Gray),
            )),
            self.state_line(),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}

impl GameCard<'_> {
    fn state_line(&self) -> Line<'static> {
        let hint = Style::default().fg(Color::DarkGray);
        if !self.game.has_result() {
            return Line::from(Span::styled("Scores appear after tip-off", hint));
        }
        if !self.revealed {
            return Line::from(vec![
                Span::styled(
                    "⚠ Spoiler Protected",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled("  r to reveal", hint),
            ]);
        }
        match self.scores {
            Some(scores) => Line::from(vec![
                Span::styled(period_line(scores), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled("  x to hide", hint),
            ]),
            None => Line::from(Span::styled("Loading score...", hint)),
        }
    }
}

pub fn status_badge(status: GameStatus) -> Span<'static> {
    let (bg, modifier) = match status {
        GameStatus::Scheduled => (Color::DarkGray, Modifier::empty()),
        GameStatus::Live => (Color::Red, Modifier::SLOW_BLINK),
        GameStatus::Final => (Color::Green, Modifier::empty()),
    };
    Span::styled(
        format!(" {} ", status.label()),
        Style::default()
            .fg(Color::White)
            .bg(bg)
            .add_modifier(Modifier::BOLD | modifier),
    )
}

/// "Sat Jan 31 · 7:00 PM ET", in league time.
pub fn tip_off_label(game: &Game) -> String {
    (game.scheduled_time - TimeDelta::hours(LEAGUE_UTC_OFFSET_HOURS))
        .naive_utc()
        .format("%a %b %-d · %-I:%M %p ET")
        .to_string()
}

/// "3rd · 10:38" while live, "Final" afterwards.
pub fn period_line(scores: &GameScores) -> String {
    match &scores.time_remaining {
        Some(clock) => format!("{} · {clock}", scores.quarter),
        None => scores.quarter.to_string(),
    }
}

pub fn venue_line(game: &Game) -> String {
    if game.broadcasts.is_empty() {
        return game.venue.clone();
    }
    format!("{} · {}", game.venue, game.broadcasts.join(", "))
}

fn team_line(team: &Team, side: &str, score: Option<u16>) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("{:<4}", team.abbreviation),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{:<24}", team.name)),
        Span::styled(format!("{side:<5}"), Style::default().fg(Color::DarkGray)),
    ];
    if let Some(score) = score {
        spans.push(Span::styled(
            format!("{score:>5}"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use nba_api::Period;
    use nba_api::clock::FixedClock;
    use nba_api::mock::MockGenerator;

    pub(crate) fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn first_saturday_game() -> Game {
        MockGenerator::with_clock(FixedClock(Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap()))
            .schedule(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap())
            .remove(0)
    }

    fn final_scores() -> GameScores {
        GameScores {
            home_score: 123,
            away_score: 121,
            quarter: Period::Final,
            time_remaining: None,
        }
    }

    fn render(card: GameCard) -> String {
        let area = Rect::new(0, 0, 60, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        card.render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn test_tip_off_in_league_time() {
        assert_eq!(tip_off_label(&first_saturday_game()), "Sat Jan 31 · 7:00 PM ET");
    }

    #[test]
    fn test_period_line() {
        assert_eq!(period_line(&final_scores()), "Final");
        let live = GameScores {
            home_score: 86,
            away_score: 84,
            quarter: Period::Third,
            time_remaining: Some("10:38".into()),
        };
        assert_eq!(period_line(&live), "3rd · 10:38");
    }

    #[test]
    fn test_hidden_card_shows_no_score() {
        let game = first_saturday_game();
        let scores = final_scores();
        let text = render(GameCard { game: &game, scores: Some(&scores), revealed: false, selected: true });
        assert!(text.contains("Spoiler Protected"));
        assert!(!text.contains("123"));
        assert!(!text.contains("121"));
        assert!(text.contains("Spectrum Center"));
    }

    #[test]
    fn test_revealed_card_shows_both_scores() {
        let game = first_saturday_game();
        let scores = final_scores();
        let text = render(GameCard { game: &game, scores: Some(&scores), revealed: true, selected: false });
        assert!(text.contains("123"));
        assert!(text.contains("121"));
        assert!(!text.contains("Spoiler Protected"));
    }

    #[test]
    fn test_venue_line_joins_broadcasts() {
        let mut game = first_saturday_game();
        game.broadcasts = vec!["ESPN".into(), "NBA League Pass".into()];
        assert_eq!(venue_line(&game), "Spectrum Center · ESPN, NBA League Pass");
        game.broadcasts.clear();
        assert_eq!(venue_line(&game), "Spectrum Center");
    }
}
