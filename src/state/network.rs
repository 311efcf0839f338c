use crate::state::messages::{NetworkRequest, NetworkResponse};
use chrono::NaiveDate;
use log::{debug, error, info};
use nba_api::Game;
use nba_api::client::{ApiError, ApiResult, ScoresApi};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    client: ScoresApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
    /// Last date requested, reloaded by `RefreshSchedule`.
    current_date: Option<NaiveDate>,
}

impl NetworkWorker {
    pub fn new(
        client: ScoresApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        info!("scores from {}", client.source_label());
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
            current_date: None,
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = match request {
                NetworkRequest::LoadSchedule { date } => self.handle_load_schedule(date).await,
                NetworkRequest::RefreshSchedule => self.handle_refresh_schedule().await,
                NetworkRequest::LoadScores { game } => self.handle_load_scores(game).await,
                NetworkRequest::LoadPlayerStats { game } => {
                    self.handle_load_player_stats(game).await
                }
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_schedule(&mut self, date: NaiveDate) -> ApiResult<NetworkResponse> {
        debug!("loading schedule for {date}");
        self.current_date = Some(date);
        let games = self.client.fetch_schedule(date).await?;
        Ok(NetworkResponse::ScheduleLoaded { date, games })
    }

    async fn handle_refresh_schedule(&mut self) -> ApiResult<NetworkResponse> {
        let Some(date) = self.current_date else {
            return Err(ApiError::Other("no schedule loaded yet".to_string()));
        };
        self.handle_load_schedule(date).await
    }

    async fn handle_load_scores(&self, game: Game) -> ApiResult<NetworkResponse> {
        debug!("loading scores for {}", game.id);
        let scores = self.client.fetch_scores(&game).await?;
        Ok(NetworkResponse::ScoresLoaded { game_id: game.id, scores })
    }

    async fn handle_load_player_stats(&self, game: Game) -> ApiResult<NetworkResponse> {
        debug!("loading box score for {}", game.id);
        let stats = self.client.fetch_player_stats(&game).await?;
        Ok(NetworkResponse::PlayerStatsLoaded { stats })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use nba_api::clock::FixedClock;
    use nba_api::mock::MockGenerator;

    fn worker() -> (mpsc::Sender<NetworkRequest>, mpsc::Receiver<NetworkResponse>) {
        let generator =
            MockGenerator::with_clock(FixedClock(Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap()));
        let (req_tx, req_rx) = mpsc::channel(8);
        let (resp_tx, resp_rx) = mpsc::channel(256);
        let worker = NetworkWorker::new(ScoresApi::local(generator), req_rx, resp_tx);
        tokio::spawn(worker.run());
        (req_tx, resp_rx)
    }

    /// Next response that is not a spinner update.
    async fn next_payload(rx: &mut mpsc::Receiver<NetworkResponse>) -> NetworkResponse {
        loop {
            match rx.recv().await.expect("worker hung up") {
                NetworkResponse::LoadingStateChanged { .. } => continue,
                other => return other,
            }
        }
    }

    #[tokio::test]
    async fn test_refresh_reloads_the_last_date() {
        let (tx, mut rx) = worker();
        let saturday = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();

        tx.send(NetworkRequest::LoadSchedule { date: saturday }).await.unwrap();
        let NetworkResponse::ScheduleLoaded { date, games } = next_payload(&mut rx).await else {
            panic!("expected a schedule");
        };
        assert_eq!(date, saturday);
        assert_eq!(games.len(), 6);

        tx.send(NetworkRequest::RefreshSchedule).await.unwrap();
        let NetworkResponse::ScheduleLoaded { date, .. } = next_payload(&mut rx).await else {
            panic!("expected a refreshed schedule");
        };
        assert_eq!(date, saturday);
    }

    #[tokio::test]
    async fn test_scores_for_a_finished_game() {
        let (tx, mut rx) = worker();
        let saturday = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        tx.send(NetworkRequest::LoadSchedule { date: saturday }).await.unwrap();
        let NetworkResponse::ScheduleLoaded { games, .. } = next_payload(&mut rx).await else {
            panic!("expected a schedule");
        };

        let game = games[0].clone();
        tx.send(NetworkRequest::LoadScores { game: game.clone() }).await.unwrap();
        match next_payload(&mut rx).await {
            NetworkResponse::ScoresLoaded { game_id, scores } => {
                assert_eq!(game_id, game.id);
                assert_eq!(scores.quarter, nba_api::Period::Final);
            }
            other => panic!("unexpected response {other:?}"),
        }
    }
}
