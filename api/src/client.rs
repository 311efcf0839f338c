use crate::mock::MockGenerator;
use crate::wire::{ErrorResponse, GamesResponse, ScoresResponse};
use crate::{Game, GamePlayerStats, GameScores};
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const API_URL_ENV: &str = "COURTSIDE_API_URL";

/// Scores client. Talks to a courtside server when one is configured and
/// generates the same data in-process otherwise.
#[derive(Debug, Clone)]
pub struct ScoresApi {
    client: Client,
    base_url: Option<String>,
    timeout: Duration,
    generator: MockGenerator,
}

impl Default for ScoresApi {
    fn default() -> Self {
        let base_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty());
        Self::build(base_url, MockGenerator::new())
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(StatusCode, String, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(status, msg, url) => write!(f, "API error for {url} ({status}): {msg}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ScoresApi {
    /// Remote when `COURTSIDE_API_URL` is set, local otherwise.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::build(Some(base_url.into()), MockGenerator::new())
    }

    pub fn local(generator: MockGenerator) -> Self {
        Self::build(None, generator)
    }

    fn build(base_url: Option<String>, generator: MockGenerator) -> Self {
        Self {
            client: Client::builder()
                .user_agent("courtside/0.1 (spoiler-free scores)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
            timeout: Duration::from_secs(10),
            generator,
        }
    }

    pub fn is_remote(&self) -> bool {
        self.base_url.is_some()
    }

    /// Where data comes from, for the status line.
    pub fn source_label(&self) -> String {
        match &self.base_url {
            Some(url) => url.clone(),
            None => "local generator".to_string(),
        }
    }

    /// Games scheduled on `date`, sorted by tip-off.
    pub async fn fetch_schedule(&self, date: NaiveDate) -> ApiResult<Vec<Game>> {
        let path = format!("/api/games?date={}", date.format("%Y-%m-%d"));
        self.remote_or_local(&path, || {
            Ok(GamesResponse::new(
                date.format("%Y-%m-%d").to_string(),
                self.generator.schedule(date),
            ))
        })
            .await
            .map(|res: GamesResponse| res.games)
    }

    pub async fn fetch_scores(&self, game: &Game) -> ApiResult<GameScores> {
        let path = format!("/api/games/{}/scores", game.id);
        self.remote_or_local(&path, || {
            let scores = self
                .generator
                .scores_for(game)
                .ok_or_else(|| ApiError::Other(format!("{} has not started yet", game.id)))?;
            Ok(ScoresResponse {
                game_id: game.id.clone(),
                scores,
                last_updated: self.generator.now(),
            })
        })
        .await
        .map(|res| res.scores)
    }

    pub async fn fetch_player_stats(&self, game: &Game) -> ApiResult<GamePlayerStats> {
        let path = format!(
            "/api/games/{}/players?home={}&away={}",
            game.id, game.home_team.abbreviation, game.away_team.abbreviation
        );
        self.remote_or_local(&path, || {
            if !game.has_result() {
                return Err(ApiError::Other(format!("{} has not started yet", game.id)));
            }
            Ok(self.generator.player_stats_for(game))
        })
        .await
    }

    /// Fetch `path` from the server, generating locally when there is no
    /// server or it cannot be reached. Server-side rejections are returned.
    async fn remote_or_local<T, F>(&self, path: &str, local: F) -> ApiResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> ApiResult<T>,
    {
        let Some(base_url) = self.base_url.as_deref() else {
            return local();
        };
        let url = format!("{base_url}{path}");
        match self.get::<T>(&url).await {
            Err(ApiError::Network(e, url)) => {
                warn!("{url} unreachable ({e}); generating locally");
                local()
            }
            other => other,
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned()));
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());
        if status == StatusCode::NOT_FOUND {
            Err(ApiError::NotFound(message))
        } else {
            Err(ApiError::Api(status, message, url.to_owned()))
        }
    }
}
