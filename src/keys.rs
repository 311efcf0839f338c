use crate::app::{App, MenuItem, today};
use crate::state::messages::NetworkRequest;
use crate::state::storage::Vote;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let mut requests = Vec::new();

    if guard.state.spoiler_prompt.is_some() {
        match (key_event.code, key_event.modifiers) {
            (Char('y') | KeyCode::Enter, _) => {
                if let Some(game) = guard.confirm_reveal() {
                    if guard.state.active_tab == MenuItem::GameDetail {
                        requests.push(NetworkRequest::LoadPlayerStats { game: game.clone() });
                    }
                    requests.push(NetworkRequest::LoadScores { game });
                }
            }
            (Char('n') | KeyCode::Esc, _) => guard.cancel_reveal(),
            (Char('c'), KeyModifiers::CONTROL) => quit(),
            _ => {}
        }
        drop(guard);
        send_all(network_requests, requests).await;
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => quit(),

        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Schedule navigation
        (MenuItem::Schedule, Char('l') | KeyCode::Right, _) => {
            let date = guard.next_day();
            requests.push(NetworkRequest::LoadSchedule { date });
        }
        (MenuItem::Schedule, Char('h') | KeyCode::Left, _) => {
            let date = guard.previous_day();
            requests.push(NetworkRequest::LoadSchedule { date });
        }
        (MenuItem::Schedule, Char('t'), _) => {
            let date = guard.jump_to(today());
            requests.push(NetworkRequest::LoadSchedule { date });
        }
        (MenuItem::Schedule, Char('j') | KeyCode::Down, _) => guard.select_next_game(),
        (MenuItem::Schedule, Char('k') | KeyCode::Up, _) => guard.select_previous_game(),
        (MenuItem::Schedule, KeyCode::Enter, _) => {
            if let Some(game) = guard.open_detail() {
                requests.push(NetworkRequest::LoadPlayerStats { game });
            }
        }

        // Game detail navigation
        (MenuItem::GameDetail, Char('j') | KeyCode::Down, _) => guard.state.detail.player_down(),
        (MenuItem::GameDetail, Char('k') | KeyCode::Up, _) => guard.state.detail.player_up(),
        (MenuItem::GameDetail, KeyCode::Tab | KeyCode::BackTab, _) => guard.state.detail.switch_side(),
        (MenuItem::GameDetail, KeyCode::Esc | KeyCode::Backspace, _) => guard.close_detail(),

        // Reveal and rate, on whichever game has focus
        (MenuItem::Schedule | MenuItem::GameDetail, Char('r'), _) => guard.request_reveal(),
        (MenuItem::Schedule | MenuItem::GameDetail, Char('x'), _) => guard.hide_scores(),
        (MenuItem::Schedule | MenuItem::GameDetail, Char('+') | Char('='), _) => guard.vote(Vote::Up),
        (MenuItem::Schedule | MenuItem::GameDetail, Char('-'), _) => guard.vote(Vote::Down),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    drop(guard);
    send_all(network_requests, requests).await;
}

async fn send_all(network_requests: &mpsc::Sender<NetworkRequest>, requests: Vec<NetworkRequest>) {
    for request in requests {
        let _ = network_requests.send(request).await;
    }
}

fn quit() {
    crate::cleanup_terminal();
    std::process::exit(0);
}
