pub mod template;

use anyhow::Error;
use chrono::NaiveDate;

use template::{render, strip_tildes};

use crate::config::AppConfig;
use crate::tools::retroachievements::{RetroAchievementsTool, RetroAchievementsToolError};
use crate::tools::youtube::YoutubeSearchTool;

/// What the post says about a game, reduced from its catalog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub id: u64,
    pub title: String,
    pub console_name: String,
    pub genre: String,
    pub developer: String,
    pub release_date: String,
    /// Latest modification day across the game's achievements.
    pub achievement_set_date: NaiveDate,
}

#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    #[error("Unable to get info from the game ID `{game_id}`... :frowning:")]
    GameInfoUnavailable {
        game_id: u64,
        #[source]
        source: RetroAchievementsToolError,
    },
}

pub struct NewsGenerator {
    catalog: RetroAchievementsTool,
    videos: Option<YoutubeSearchTool>,
}

impl NewsGenerator {
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let catalog = RetroAchievementsTool::new(config.retroachievements)?;
        let videos = YoutubeSearchTool::new(config.youtube);
        if videos.is_none() {
            log::warn!("YouTube search disabled, longplay links stay as placeholders");
        }
        Ok(Self { catalog, videos })
    }

    /// Build the post for `game_id`. Only a failed catalog lookup is an error; a missing
    /// video leaves the placeholder in place.
    pub async fn generate(&self, game_id: u64) -> Result<String, NewsError> {
        log::info!("Getting info for game ID `{}`, please wait...", game_id);
        let summary = self
            .catalog
            .game_summary(game_id)
            .await
            .map_err(|source| {
                log::warn!("catalog lookup for game {} failed: {:#}", game_id, source);
                NewsError::GameInfoUnavailable { game_id, source }
            })?;

        let longplay_link = match self.videos.as_ref() {
            Some(videos) => videos.longplay_link(&search_terms(&summary)).await,
            None => None,
        };

        Ok(render(&summary, longplay_link.as_deref()))
    }
}

/// Video search terms for a game: its title without tildes, then its console.
pub fn search_terms(summary: &GameSummary) -> String {
    format!("{} {}", strip_tildes(&summary.title), summary.console_name)
}
