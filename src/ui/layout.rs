use tui::layout::{Constraint, Layout, Rect, Size};
pub const TAB_BAR_HEIGHT: u16 = 3;
pub const LOG_PANE_HEIGHT: u16 = 10;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub tab_bar: [Rect; 2],
    pub main: Rect,
    pub logs: Option<Rect>,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool, show_logs: bool) {
        *self = Self::from_rect(area, full_screen, show_logs);
    }

    fn from_rect(area: Rect, full_screen: bool, show_logs: bool) -> Self {
        let (tab, body) = if full_screen {
            (Rect::ZERO, area)
        } else {
            let [tab, body] =
                Layout::vertical([Constraint::Length(TAB_BAR_HEIGHT), Constraint::Fill(1)]).areas(area);
            (tab, body)
        };

        let (main, logs) = if show_logs {
            let [main, logs] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(LOG_PANE_HEIGHT)]).areas(body);
            (main, Some(logs))
        } else {
            (body, None)
        };

        LayoutAreas {
            tab_bar: if full_screen { [Rect::ZERO, Rect::ZERO] } else { Self::split_tab_bar(tab) },
            main,
            logs,
        }
    }

    fn split_tab_bar(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)]).areas(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_bar_on_top() {
        let layout = LayoutAreas::new(Size::new(100, 40));
        assert_eq!(layout.tab_bar[0].y, 0);
        assert_eq!(layout.tab_bar[0].height, TAB_BAR_HEIGHT);
        assert_eq!(layout.main.y, TAB_BAR_HEIGHT);
        assert_eq!(layout.main.height, 40 - TAB_BAR_HEIGHT);
        assert!(layout.logs.is_none());
    }

    #[test]
    fn test_log_pane_below_main() {
        let mut layout = LayoutAreas::new(Size::new(100, 40));
        layout.update(Rect::new(0, 0, 100, 40), false, true);
        let logs = layout.logs.unwrap();
        assert_eq!(logs.height, LOG_PANE_HEIGHT);
        assert_eq!(logs.y, layout.main.bottom());
    }

    #[test]
    fn test_full_screen_hides_tabs() {
        let mut layout = LayoutAreas::new(Size::new(100, 40));
        layout.update(Rect::new(0, 0, 100, 40), true, false);
        assert_eq!(layout.tab_bar, [Rect::ZERO, Rect::ZERO]);
        assert_eq!(layout.main, Rect::new(0, 0, 100, 40));
    }
}
