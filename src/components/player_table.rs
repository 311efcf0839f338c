use nba_api::{PlayerStats, shooting_percentage};
use tui::buffer::Buffer;
use tui::layout::{Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::Line;
use tui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Widget};

const HEADERS: [&str; 8] = ["Player", "PTS", "REB", "AST", "STL", "BLK", "FG%", "MIN"];

/// One team's box score. The selected row is highlighted and, when the table
/// has focus, expanded with shooting splits and fouls on the last line.
pub struct PlayerTable<'a> {
    pub team_name: &'a str,
    pub players: &'a [PlayerStats],
    pub selected: usize,
    pub focused: bool,
}

impl Widget for PlayerTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused { Color::Yellow } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(format!(" {} ", self.team_name));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 2 {
            return;
        }

        let [table_area, details_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

        let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h)))
            .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));

        let rows = self.players.iter().enumerate().map(|(idx, p)| {
            let mut style = if p.did_not_play() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            if self.focused && idx == self.selected {
                style = style.bg(Color::DarkGray).fg(Color::White);
            }
            Row::new(stat_cells(p)).style(style)
        });

        let widths = [
            Constraint::Min(22),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(6),
            Constraint::Length(6),
        ];
        Widget::render(Table::new(rows, widths).header(header).column_spacing(1), table_area, buf);

        if self.focused
            && let Some(player) = self.players.get(self.selected)
        {
            Paragraph::new(Line::styled(
                player_details(player),
                Style::default().fg(Color::Cyan),
            ))
            .render(details_area, buf);
        }
    }
}

pub fn stat_cells(p: &PlayerStats) -> Vec<String> {
    vec![
        format!("#{} {} {:?}", p.jersey_number, p.player_name, p.position),
        p.points.to_string(),
        p.rebounds.to_string(),
        p.assists.to_string(),
        p.steals.to_string(),
        p.blocks.to_string(),
        shooting_percentage(p.field_goals_made, p.field_goals_attempted),
        p.minutes.clone(),
    ]
}

/// "3PT 2/6 (33.3%) · FT 4/5 (80.0%) · FG 9/20 · Fouls 3"
pub fn player_details(p: &PlayerStats) -> String {
    format!(
        "{}  3PT {}/{} ({}%) · FT {}/{} ({}%) · FG {}/{} · Fouls {}",
        p.player_name,
        p.three_pointers_made,
        p.three_pointers_attempted,
        shooting_percentage(p.three_pointers_made, p.three_pointers_attempted),
        p.free_throws_made,
        p.free_throws_attempted,
        shooting_percentage(p.free_throws_made, p.free_throws_attempted),
        p.field_goals_made,
        p.field_goals_attempted,
        p.fouls,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::game_card::tests::buffer_text;
    use nba_api::mock::generate_player_stats;

    fn sample() -> PlayerStats {
        let mut p = generate_player_stats("game-3", "GSW", "MIA").home_team_stats.remove(0);
        p.player_name = "Stephen Curry".into();
        p.three_pointers_made = 2;
        p.three_pointers_attempted = 6;
        p.free_throws_made = 4;
        p.free_throws_attempted = 5;
        p.field_goals_made = 9;
        p.field_goals_attempted = 20;
        p.fouls = 3;
        p
    }

    #[test]
    fn test_player_details() {
        assert_eq!(
            player_details(&sample()),
            "Stephen Curry  3PT 2/6 (33.3%) · FT 4/5 (80.0%) · FG 9/20 · Fouls 3"
        );
    }

    #[test]
    fn test_stat_cells_follow_headers() {
        let p = sample();
        let cells = stat_cells(&p);
        assert_eq!(cells.len(), HEADERS.len());
        assert_eq!(cells[6], "45.0");
        assert_eq!(cells[7], p.minutes);
    }

    #[test]
    fn test_zero_attempts_read_zero_percent() {
        let mut p = sample();
        p.field_goals_made = 0;
        p.field_goals_attempted = 0;
        assert_eq!(stat_cells(&p)[6], "0.0");
    }

    #[test]
    fn test_focused_table_expands_selection() {
        let players = vec![sample()];
        let area = Rect::new(0, 0, 80, 6);

        let mut buf = Buffer::empty(area);
        PlayerTable { team_name: "Golden State Warriors", players: &players, selected: 0, focused: true }
            .render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Golden State Warriors"));
        assert!(text.contains("Fouls 3"));

        let mut buf = Buffer::empty(area);
        PlayerTable { team_name: "Golden State Warriors", players: &players, selected: 0, focused: false }
            .render(area, &mut buf);
        assert!(!buffer_text(&buf).contains("Fouls 3"));
    }
}
