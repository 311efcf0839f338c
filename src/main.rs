mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::PeriodicRefresher;
use chrono::NaiveDate;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::error;
use nba_api::client::ScoresApi;
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[derive(Debug, PartialEq)]
enum Command {
    Run { start_date: Option<NaiveDate> },
    Help,
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let start_date = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run { start_date }) => start_date,
        Ok(Command::Help) => {
            println!("{}", usage_text());
            return Ok(());
        }
        Ok(Command::Version) => {
            println!("courtside {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    };

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(log::LevelFilter::Info)?;
    tui_logger::set_default_level(log::LevelFilter::Info);

    let app = Arc::new(Mutex::new(App::new(start_date)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(ScoresApi::new(), network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Periodic schedule refresh thread
    let periodic_updater = PeriodicRefresher::new(network_req_tx.clone());
    let periodic_task = tokio::spawn(periodic_updater.run());

    // Trigger schedule load on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    periodic_task.abort();

    Ok(())
}

fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut start_date = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let date_value = match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--date" => args.next().ok_or("--date needs a value")?,
            other => match other.strip_prefix("--date=") {
                Some(value) => value.to_string(),
                None => return Err(format!("Unknown argument: {other}")),
            },
        };
        let date = NaiveDate::parse_from_str(&date_value, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date '{date_value}', expected YYYY-MM-DD"))?;
        start_date = Some(date);
    }

    Ok(Command::Run { start_date })
}

fn usage_text() -> &'static str {
    "courtside - spoiler-free NBA scores in the terminal

Usage:
  courtside [--date YYYY-MM-DD]
  courtside --help
  courtside --version

Environment:
  COURTSIDE_API_URL    Scores service base URL (default: built-in generator)
  COURTSIDE_STORAGE    Path to the reveal/vote storage file
  COURTSIDE_LOG        Log level: error, warn, info, debug, trace"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw && !loading.is_loading {
                    let app_guard = app.lock().await;
                    draw::draw(&mut terminal, &app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw =
                    handle_network_response(response, &app, &network_requests, &mut loading).await;
                if should_redraw {
                    let app_guard = app.lock().await;
                    draw::draw(&mut terminal, &app_guard, loading);
                }
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let date = app.lock().await.state.schedule.date;
            let _ = network_requests.send(NetworkRequest::LoadSchedule { date }).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        NetworkResponse::ScheduleLoaded { date, games } => {
            let mut guard = app.lock().await;
            let revealed = guard.on_schedule_loaded(date, games);
            drop(guard);
            for game in revealed {
                let _ = network_requests.send(NetworkRequest::LoadScores { game }).await;
            }
        }
        NetworkResponse::ScoresLoaded { game_id, scores } => {
            let mut guard = app.lock().await;
            guard.on_scores_loaded(game_id, scores);
        }
        NetworkResponse::PlayerStatsLoaded { stats } => {
            let mut guard = app.lock().await;
            guard.on_player_stats_loaded(stats);
        }
        NetworkResponse::Error { message } => {
            error!("Network error: {message}");
            let mut guard = app.lock().await;
            guard.on_error(message);
        }
    }
    !loading.is_loading
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

/// Best effort: also runs from the panic hook, where there is nobody to
/// report a failure to.
pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_runs_on_today() {
        assert_eq!(parse_args(args(&[])), Ok(Command::Run { start_date: None }));
    }

    #[test]
    fn test_date_flag_both_forms() {
        let expected = Ok(Command::Run { start_date: NaiveDate::from_ymd_opt(2026, 1, 31) });
        assert_eq!(parse_args(args(&["--date", "2026-01-31"])), expected);
        assert_eq!(parse_args(args(&["--date=2026-01-31"])), expected);
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse_args(args(&["-h"])), Ok(Command::Help));
        assert_eq!(parse_args(args(&["--date", "2026-01-31", "--version"])), Ok(Command::Version));
    }

    #[test]
    fn test_bad_args_are_rejected() {
        assert!(parse_args(args(&["--date"])).is_err());
        assert!(parse_args(args(&["--date", "31/01/2026"])).is_err());
        assert!(parse_args(args(&["--verbose"])).is_err());
    }
}
