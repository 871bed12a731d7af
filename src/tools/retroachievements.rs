use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::config::deserialize_option_u64;
use crate::news::GameSummary;
use crate::tools::redact_url;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, thiserror::Error)]
pub enum RetroAchievementsToolError {
    #[error("RetroAchievements API error (status {status}): {body}")]
    ApiStatus { status: u16, body: String },
    #[error("Game {0} has no achievements")]
    NoAchievements(u64),
    #[error("Invalid achievement timestamp: {0}")]
    InvalidDate(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Deserialize, Debug, Clone)]
pub struct RetroAchievementsConfig {
    #[serde(rename = "ra_user")]
    pub user: String,
    #[serde(rename = "ra_web_api_key")]
    pub web_api_key: String,
    #[serde(rename = "ra_base_url", default = "default_base_url")]
    pub base_url: String,
    #[serde(
        rename = "ra_timeout_secs",
        default,
        deserialize_with = "deserialize_option_u64"
    )]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "https://retroachievements.org".to_string()
}

/// Looks up games in the RetroAchievements catalog.
#[derive(Debug, Clone)]
pub struct RetroAchievementsTool {
    user: String,
    web_api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct GameExtended {
    title: Option<String>,
    console_name: Option<String>,
    genre: Option<String>,
    developer: Option<String>,
    released: Option<String>,
    #[serde(default, deserialize_with = "deserialize_achievements")]
    achievements: Vec<Achievement>,
}

#[derive(Deserialize, Debug)]
struct Achievement {
    #[serde(rename = "DateModified")]
    date_modified: String,
}

/// The catalog sends achievements keyed by ID, but an empty set comes back as `[]` or `null`.
fn deserialize_achievements<'de, D>(deserializer: D) -> Result<Vec<Achievement>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Collection {
        Keyed(HashMap<String, Achievement>),
        List(Vec<Achievement>),
    }

    let collection: Option<Collection> = Option::deserialize(deserializer)?;
    Ok(match collection {
        Some(Collection::Keyed(map)) => map.into_values().collect(),
        Some(Collection::List(list)) => list,
        None => Vec::new(),
    })
}

impl RetroAchievementsTool {
    pub fn new(config: RetroAchievementsConfig) -> Result<Self, RetroAchievementsToolError> {
        let timeout_secs = config.timeout_secs.unwrap_or(15);
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("achnews/0.1")
            .build()
            .context("Failed to build RetroAchievements HTTP client")?;

        Ok(Self {
            user: config.user,
            web_api_key: config.web_api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Fetch the extended record for `game_id` and reduce it to a [`GameSummary`].
    ///
    /// Fails when the request fails, the catalog answers with an error status, or the
    /// game has no achievements to date the set by.
    pub async fn game_summary(
        &self,
        game_id: u64,
    ) -> Result<GameSummary, RetroAchievementsToolError> {
        log::info!("fetching extended game record for game {}...", game_id);
        let url = format!("{}/API/API_GetGameExtended.php", self.base_url);
        let id = game_id.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("z", self.user.as_str()),
                ("y", self.web_api_key.as_str()),
                ("i", id.as_str()),
            ])
            .send()
            .await
            .map_err(redact_url)
            .context("RetroAchievements request failed")?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RetroAchievementsToolError::ApiStatus { status, body });
        }

        let body = response
            .text()
            .await
            .map_err(redact_url)
            .context("RetroAchievements response body")?;
        let game: GameExtended =
            serde_json::from_str(&body).context("RetroAchievements game JSON")?;
        log::debug!("game {} has {} achievements", game_id, game.achievements.len());

        let achievement_set_date = achievement_set_date(
            game.achievements
                .iter()
                .map(|achievement| achievement.date_modified.as_str()),
        )?
        .ok_or(RetroAchievementsToolError::NoAchievements(game_id))?;

        Ok(GameSummary {
            id: game_id,
            title: game.title.unwrap_or_default(),
            console_name: game.console_name.unwrap_or_default(),
            genre: game.genre.unwrap_or_default(),
            developer: game.developer.unwrap_or_default(),
            release_date: game.released.unwrap_or_default(),
            achievement_set_date,
        })
    }
}

/// Latest calendar day among `timestamps`, ignoring time of day.
///
/// Returns `Ok(None)` for an empty input. Order and duplicates never change the result.
pub fn achievement_set_date<'a, I>(
    timestamps: I,
) -> Result<Option<NaiveDate>, RetroAchievementsToolError>
where
    I: IntoIterator<Item = &'a str>,
{
    let days = timestamps
        .into_iter()
        .map(parse_day)
        .collect::<Result<HashSet<_>, _>>()?;
    Ok(days.into_iter().max())
}

fn parse_day(timestamp: &str) -> Result<NaiveDate, RetroAchievementsToolError> {
    let trimmed = timestamp.trim();
    NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
        .map(|datetime| datetime.date())
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .map_err(|_| RetroAchievementsToolError::InvalidDate(timestamp.to_string()))
}
