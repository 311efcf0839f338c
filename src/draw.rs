use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::game_card::{CARD_HEIGHT, GameCard, period_line, status_badge, tip_off_label, venue_line};
use crate::components::modal::SpoilerDialog;
use crate::components::player_table::PlayerTable;
use crate::state::app_state::{RatingTier, TeamSide};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use nba_api::Game;

static TABS: &[&str; 2] = &["Schedule", "Game Detail"];

/// Both box scores side by side from this width, one at a time below it.
const SIDE_BY_SIDE_WIDTH: u16 = 140;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Schedule => draw_schedule(f, layout.main, app),
            MenuItem::GameDetail => draw_game_detail(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        if let Some(prompt) = &app.state.spoiler_prompt {
            f.render_widget(SpoilerDialog { matchup: &prompt.matchup }, f.area());
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Schedule => 0,
        MenuItem::GameDetail => 1,
        MenuItem::Help => usize::from(app.state.previous_tab == MenuItem::GameDetail),
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new(format!("{}  Help: ? ", app.state.schedule.date.format("%a %b %-d, %Y")))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_schedule(f: &mut Frame, area: Rect, app: &App) {
    let schedule = &app.state.schedule;
    let block = default_border(Color::White).title(" Schedule ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [header, key_legend, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Fill(1)]).areas(inner);

    let count = if schedule.loaded {
        format!("{} games", schedule.games.len())
    } else {
        "loading".to_string()
    };
    f.render_widget(
        Paragraph::new(format!("◀ {} ▶  {count}", schedule.date.format("%A, %B %-d %Y")))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        header,
    );
    f.render_widget(
        Paragraph::new("Keys: h/l=day  t=today  j/k=move  r=reveal  x=hide  Enter=details  ?=help  q=quit")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    if schedule.games.is_empty() {
        let msg = match (&app.state.last_error, schedule.loaded) {
            (Some(err), _) => format!("Schedule load failed:\n{err}"),
            (None, false) => "Loading schedule...".to_string(),
            (None, true) => "No games scheduled".to_string(),
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            content,
        );
        return;
    }

    let visible = (content.height / CARD_HEIGHT).max(1) as usize;
    let first = first_visible(schedule.selected, visible);
    for (row, (idx, game)) in schedule.games.iter().enumerate().skip(first).take(visible).enumerate() {
        let y = content.y + row as u16 * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(content.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        f.render_widget(
            GameCard {
                game,
                scores: app.scores_for(game),
                revealed: app.is_revealed(game),
                selected: idx == schedule.selected,
            },
            Rect::new(content.x, y, content.width, height),
        );
    }
}

/// Index of the first card to draw so that `selected` stays on screen.
pub fn first_visible(selected: usize, visible: usize) -> usize {
    (selected + 1).saturating_sub(visible.max(1))
}

fn draw_game_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Game Detail ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let game = app
        .state
        .detail
        .game_id
        .as_deref()
        .and_then(|id| app.state.schedule.game(id));
    let Some(game) = game else {
        f.render_widget(
            Paragraph::new("Select a game on the Schedule tab and press Enter")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let [header, score, rating, _gap, tables] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    f.render_widget(Paragraph::new(game_header(game)), header);
    f.render_widget(Paragraph::new(score_summary(app, game)), score);
    f.render_widget(Paragraph::new(rating_line(app, game)), rating);

    if !app.is_revealed(game) {
        let msg = if game.has_result() {
            "Box score hidden until the score is revealed (r)"
        } else {
            "Box score available after tip-off"
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            tables,
        );
        return;
    }

    let Some(stats) = app.state.detail.stats.as_ref() else {
        let msg = match app.state.last_error.as_deref() {
            Some(err) => format!("Box score load failed:\n{err}"),
            None => "Loading box score...".to_string(),
        };
        f.render_widget(Paragraph::new(msg).alignment(Alignment::Center), tables);
        return;
    };

    let detail = &app.state.detail;
    let away = PlayerTable {
        team_name: &game.away_team.name,
        players: &stats.away_team_stats,
        selected: detail.selected_player,
        focused: detail.side == TeamSide::Away,
    };
    let home = PlayerTable {
        team_name: &game.home_team.name,
        players: &stats.home_team_stats,
        selected: detail.selected_player,
        focused: detail.side == TeamSide::Home,
    };

    if tables.width >= SIDE_BY_SIDE_WIDTH {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(tables);
        f.render_widget(away, left);
        f.render_widget(home, right);
    } else {
        let [hint, table] = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(tables);
        f.render_widget(
            Paragraph::new("Tab switches team, j/k moves between players")
                .style(Style::default().fg(Color::DarkGray)),
            hint,
        );
        match detail.side {
            TeamSide::Away => f.render_widget(away, table),
            TeamSide::Home => f.render_widget(home, table),
        }
    }
}

fn game_header(game: &Game) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!("{} at {}", game.away_team.name, game.home_team.name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            status_badge(game.status),
            Span::raw(format!(" {}", tip_off_label(game))),
        ]),
        Line::from(Span::styled(venue_line(game), Style::default().fg(Color::Gray))),
    ]
}

fn score_summary(app: &App, game: &Game) -> Line<'static> {
    if !game.has_result() {
        return Line::from(Span::styled(
            "Not started yet",
            Style::default().fg(Color::DarkGray),
        ));
    }
    if !app.is_revealed(game) {
        return Line::from(Span::styled(
            "⚠ Spoiler Protected  r to reveal",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }
    match app.scores_for(game) {
        Some(scores) => Line::from(vec![
            Span::styled(
                format!(
                    "{} {}  {} {}",
                    game.away_team.abbreviation,
                    scores.away_score,
                    game.home_team.abbreviation,
                    scores.home_score
                ),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}", period_line(scores))),
            Span::styled("  x to hide", Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from("Loading score..."),
    }
}

fn rating_line(app: &App, game: &Game) -> Line<'static> {
    let rating = app.rating_for(&game.id);
    let mut spans = vec![
        Span::raw("Game rating "),
        Span::styled(
            rating.label(),
            Style::default()
                .fg(rating_color(rating.tier()))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" / 10"),
    ];
    if rating.votes > 0 {
        let noun = if rating.votes == 1 { "vote" } else { "votes" };
        spans.push(Span::styled(
            format!("  {} {noun}", rating.votes),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let hint = match rating.user_vote {
        Some(vote) => format!("  you voted {}", vote.as_str()),
        None => "  + good game  - boring game".to_string(),
    };
    spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
    Line::from(spans)
}

pub fn rating_color(tier: RatingTier) -> Color {
    match tier {
        RatingTier::High => Color::Green,
        RatingTier::Middling => Color::Yellow,
        RatingTier::Low => Color::Red,
    }
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" Help ");
    let text = "\
Schedule
  ←/→  h/l    previous / next day
  t           jump to today
  ↑/↓  j/k    select game
  Enter       open game detail
  r           reveal score (asks first)
  x           hide score again
  + / -       rate the game (one vote per game)

Game detail
  ↑/↓  j/k    select player
  Tab         switch team
  Esc         back to schedule

General
  \"           toggle log pane
  f           full screen
  ?           this help, Esc to close
  q           quit";
    f.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logger = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .output_target(false)
        .output_file(false)
        .output_line(false);
    f.render_widget(logger, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
