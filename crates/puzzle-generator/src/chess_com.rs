//! Chess.com public API client: monthly archives of a player's games.

use std::time::Duration;

use chess_core::GameRecord;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::GeneratorError;

pub const DEFAULT_API_BASE: &str = "https://api.chess.com/pub";

pub struct ChessComClient {
    client: Client,
    api_base: String,
}

impl ChessComClient {
    pub fn new(api_base: impl Into<String>) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .user_agent("mate-puzzle-generator/0.1")
            .timeout(Duration::from_secs(600))
            .build()
            .map_err(|e| GeneratorError::Archive(format!("HTTP client error: {e}")))?;
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the list of monthly archive URLs, oldest first.
    pub async fn fetch_archives(&self, username: &str) -> Result<Vec<String>, GeneratorError> {
        let url = format!("{}/player/{}/games/archives", self.api_base, username);
        let data = self.get_json(&url).await?;
        parse_archives(&data)
    }

    /// Fetch the games of one monthly archive.
    pub async fn fetch_archive_games(&self, url: &str) -> Result<Vec<GameRecord>, GeneratorError> {
        let data = self.get_json(url).await?;
        parse_games(&data)
    }

    /// Download games month by month until `max_games` have been collected.
    pub async fn fetch_user_games(
        &self,
        username: &str,
        max_games: usize,
    ) -> Result<Vec<GameRecord>, GeneratorError> {
        let archives = self.fetch_archives(username).await?;
        info!(username, archives = archives.len(), "Downloading game archives");

        let mut games = Vec::new();
        for url in &archives {
            if games.len() >= max_games {
                break;
            }
            let month = self.fetch_archive_games(url).await?;
            debug!(url = %url, games = month.len(), "Archive downloaded");
            games.extend(month);
        }

        games.truncate(max_games);
        Ok(games)
    }

    async fn get_json(&self, url: &str) -> Result<Value, GeneratorError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GeneratorError::Archive(format!("Request error for {url}: {e}")))?;

        if !resp.status().is_success() {
            return Err(GeneratorError::Archive(format!(
                "HTTP {} for {url}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| GeneratorError::Archive(format!("JSON parse error for {url}: {e}")))
    }
}

/// Read `{"archives": [url, ...]}`.
pub fn parse_archives(data: &Value) -> Result<Vec<String>, GeneratorError> {
    let archives = data["archives"]
        .as_array()
        .ok_or_else(|| GeneratorError::Archive("response has no \"archives\" list".into()))?;

    archives
        .iter()
        .map(|v| {
            v.as_str()
                .map(String::from)
                .ok_or_else(|| GeneratorError::Archive(format!("archive entry is not a URL: {v}")))
        })
        .collect()
}

/// Read `{"games": [...]}`, keeping standard-chess games that carry a PGN.
pub fn parse_games(data: &Value) -> Result<Vec<GameRecord>, GeneratorError> {
    let games = data["games"]
        .as_array()
        .ok_or_else(|| GeneratorError::Archive("response has no \"games\" list".into()))?;

    let mut results = Vec::new();
    for game in games {
        // Skip variant games
        let rules = game.get("rules").and_then(|v| v.as_str()).unwrap_or("chess");
        if rules != "chess" {
            continue;
        }

        let Some(pgn) = game.get("pgn").and_then(|v| v.as_str()) else {
            continue;
        };
        let Some(id) = game
            .get("uuid")
            .or_else(|| game.get("url"))
            .and_then(|v| v.as_str())
        else {
            continue;
        };

        results.push(GameRecord::new(id, pgn));
    }

    Ok(results)
}
