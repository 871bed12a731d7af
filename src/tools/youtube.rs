use anyhow::Context;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::deserialize_option_u64;
use crate::tools::redact_url;

/// Prepended to every search so results favour full playthrough videos.
pub const LONGPLAY_QUALIFIER: &str = "longplay";

#[derive(Debug, thiserror::Error)]
pub enum YoutubeSearchToolError {
    #[error("YouTube API error (status {status}): {body}")]
    ApiStatus { status: u16, body: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Deserialize, Debug, Clone)]
pub struct YoutubeConfig {
    #[serde(rename = "youtube_api_key")]
    pub api_key: Option<String>,
    #[serde(rename = "youtube_base_url", default = "default_base_url")]
    pub base_url: String,
    #[serde(
        rename = "youtube_timeout_secs",
        default,
        deserialize_with = "deserialize_option_u64"
    )]
    pub timeout_secs: Option<u64>,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "https://www.googleapis.com".to_string()
}

#[derive(Debug, Clone)]
pub struct YoutubeSearchTool {
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize, Debug)]
struct SearchItem {
    id: ResourceId,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    kind: String,
    video_id: Option<String>,
    channel_id: Option<String>,
    playlist_id: Option<String>,
}

impl ResourceId {
    fn link(&self) -> Option<String> {
        match self.kind.as_str() {
            "youtube#video" => self
                .video_id
                .as_ref()
                .map(|id| format!("https://www.youtube.com/watch?v={}", id)),
            "youtube#channel" => self
                .channel_id
                .as_ref()
                .map(|id| format!("https://www.youtube.com/channel/{}", id)),
            "youtube#playlist" => self
                .playlist_id
                .as_ref()
                .map(|id| format!("https://www.youtube.com/playlist?list={}", id)),
            _ => None,
        }
    }
}

impl YoutubeSearchTool {
    /// Returns `None` when no API key is configured or the client cannot be built; the
    /// post then falls back to a placeholder.
    pub fn new(config: YoutubeConfig) -> Option<Self> {
        let Some(api_key) = config
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
        else {
            log::warn!("no YouTube API key configured");
            return None;
        };

        let client = match Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.unwrap_or(15)))
            .user_agent("achnews/0.1")
            .build()
        {
            Ok(client) => client,
            Err(err) => {
                log::warn!("failed to build YouTube HTTP client: {}", err.without_url());
                return None;
            }
        };

        Some(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Best-effort lookup of a longplay video for `terms`. Any failure is logged and
    /// reported as no link.
    pub async fn longplay_link(&self, terms: &str) -> Option<String> {
        let query = format!("{} {}", LONGPLAY_QUALIFIER, terms);
        match self.search(&query).await {
            Ok(Some(link)) => Some(link),
            Ok(None) => {
                log::warn!("no video found for '{}'", query);
                None
            }
            Err(err) => {
                log::warn!("video search for '{}' failed: {:#}", query, err);
                None
            }
        }
    }

    /// Link of the top result for `query`, if any.
    pub async fn search(&self, query: &str) -> Result<Option<String>, YoutubeSearchToolError> {
        log::info!("searching videos for '{}'...", query);
        let url = format!("{}/youtube/v3/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", "1"),
                ("q", query),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(redact_url)
            .context("YouTube search request failed")?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(YoutubeSearchToolError::ApiStatus { status, body });
        }

        let body = response
            .text()
            .await
            .map_err(redact_url)
            .context("YouTube search body")?;
        let results: SearchResponse =
            serde_json::from_str(&body).context("YouTube search JSON")?;

        Ok(results.items.iter().find_map(|item| item.id.link()))
    }
}
