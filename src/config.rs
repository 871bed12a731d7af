use crate::tools::retroachievements::RetroAchievementsConfig;
use crate::tools::youtube::YoutubeConfig;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    #[serde(flatten)]
    pub retroachievements: RetroAchievementsConfig,
    #[serde(flatten)]
    pub youtube: YoutubeConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(envy::prefixed("ACHNEWS_").from_env::<AppConfig>()?)
    }
}

// Flattened structs see every env value as a string, so numbers are parsed by hand.
pub(crate) fn deserialize_option_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(s) => s.parse::<u64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
