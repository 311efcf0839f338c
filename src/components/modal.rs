use tui::buffer::Buffer;
use tui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap};

const DIALOG_WIDTH: u16 = 56;
const DIALOG_HEIGHT: u16 = 9;

/// Confirmation shown before a score is revealed.
pub struct SpoilerDialog<'a> {
    pub matchup: &'a str,
}

impl Widget for SpoilerDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = centered(area, DIALOG_WIDTH, DIALOG_HEIGHT);
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Red))
            .title(" ⚠ Spoiler Alert ")
            .title_alignment(Alignment::Center);

        let text = vec![
            Line::from(format!("Show the score for {}?", self.matchup)),
            Line::from(""),
            Line::from("This reveals the result. You can hide it again with x."),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "[y] Show me the score",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("[n] Cancel", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// A `width` x `height` rect in the middle of `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::game_card::tests::buffer_text;

    #[test]
    fn test_centered_rect() {
        let rect = centered(Rect::new(0, 0, 100, 40), DIALOG_WIDTH, DIALOG_HEIGHT);
        assert_eq!((rect.width, rect.height), (56, 9));
        assert_eq!(rect.x, 22);
        // 31 spare rows do not split evenly
        assert!((15..=16).contains(&rect.y));
    }

    #[test]
    fn test_centered_rect_shrinks_to_fit() {
        let rect = centered(Rect::new(0, 0, 30, 5), DIALOG_WIDTH, DIALOG_HEIGHT);
        assert_eq!(rect, Rect::new(0, 0, 30, 5));
    }

    #[test]
    fn test_dialog_names_the_matchup() {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        SpoilerDialog { matchup: "PHX @ CHA" }.render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Spoiler Alert"));
        assert!(text.contains("PHX @ CHA"));
        assert!(text.contains("[y] Show me the score"));
    }
}
