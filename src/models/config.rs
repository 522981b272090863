use poise::serenity_prelude as serenity;
use serde::{Deserialize, Serialize};

/// Bot configuration persisted in config.json
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct BotConfig {
    /// Channel ID where the roster is rendered
    #[serde(rename = "rosterChannelId", default)]
    pub roster_channel_id: Option<String>,
    /// Keys we don't manage, written back untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BotConfig {
    /// Configured render channel, if it parses as a snowflake
    pub fn roster_channel(&self) -> Option<serenity::ChannelId> {
        self.roster_channel_id
            .as_deref()
            .and_then(|id| id.parse::<u64>().ok())
            .filter(|id| *id != 0)
            .map(serenity::ChannelId::new)
    }

    pub fn set_roster_channel(&mut self, channel_id: serenity::ChannelId) {
        self.roster_channel_id = Some(channel_id.to_string());
    }
}
