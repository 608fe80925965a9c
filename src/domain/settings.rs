use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named, persisted player configuration.
///
/// Serialization is camelCase (`feedUrl`, `sortAscending`, ...) so JSON
/// output matches what the embed surface consumes. The feed pipeline only
/// ever reads `feed_url`, `sort_ascending`, and `show_first_post`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSettings {
    pub id: String,
    pub name: String,
    pub feed_url: String,
    #[serde(default)]
    pub colors: PlayerColors,
    #[serde(default = "default_list_height")]
    pub list_height: u32,
    #[serde(default)]
    pub sort_ascending: bool,
    #[serde(default)]
    pub show_first_post: bool,
    #[serde(default)]
    pub player_type: PlayerType,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerColors {
    pub background: String,
    pub text: String,
    pub primary: String,
    pub secondary: String,
}

impl Default for PlayerColors {
    fn default() -> Self {
        Self {
            background: "#ffffff".into(),
            text: "#000000".into(),
            primary: "#9b87f5".into(),
            secondary: "#7e69ab".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerType {
    #[default]
    Big,
    Medium,
    Small,
}

impl PlayerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerType::Big => "big",
            PlayerType::Medium => "medium",
            PlayerType::Small => "small",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "big" => Some(PlayerType::Big),
            "medium" => Some(PlayerType::Medium),
            "small" => Some(PlayerType::Small),
            _ => None,
        }
    }
}

fn default_list_height() -> u32 {
    600
}

impl PlayerSettings {
    /// Create a fresh configuration with a random id and default appearance.
    pub fn new(name: impl Into<String>, feed_url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            feed_url: feed_url.into(),
            colors: PlayerColors::default(),
            list_height: default_list_height(),
            sort_ascending: false,
            show_first_post: false,
            player_type: PlayerType::default(),
            created_at: now,
            updated_at: now,
        }
    }
}
