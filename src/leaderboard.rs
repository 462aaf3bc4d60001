//! Response shapes of the leaderboard API.
//!
//! Every field is optional on the wire; the accessors below apply the defaults used when
//! rendering, so the rest of the bot never deals with missing data.

use serde::Deserialize;
use serde_json::Value;

pub const UNKNOWN_PLAYER: &str = "Unknown";
pub const UNKNOWN_AUTHOR: &str = "Unknown";
pub const DEFAULT_CAMPAIGN_NAME: &str = "Current Campaign";
pub const UNKNOWN_SEASON: &str = "?";

/// `GET {base}/map/india-top10/{tmxId}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLeaderboard {
    #[serde(default)]
    top10: Option<Vec<LeaderboardEntry>>,
    pub map_name: Option<String>,
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_time: Value,
    pub thumbnail: Option<String>,
    pub map_uid: Option<String>,
    #[serde(default)]
    pub tmx_id: Value,
}

/// `GET {base}/india-top10`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignLeaderboard {
    #[serde(default)]
    top10: Option<Vec<LeaderboardEntry>>,
    #[serde(default)]
    pub campaign: Option<CampaignInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignInfo {
    pub name: Option<String>,
    pub season_uid: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub display_name: Option<String>,
    pub account_id: Option<String>,
    /// Record time in ms on map leaderboards.
    #[serde(default)]
    pub time_or_score: Value,
    /// Campaign points.
    #[serde(default)]
    pub points: Value,
    #[serde(default)]
    pub position_world: Value,
}

impl LeaderboardEntry {
    pub fn name(&self) -> &str {
        non_empty(&self.display_name)
            .or_else(|| non_empty(&self.account_id))
            .unwrap_or(UNKNOWN_PLAYER)
    }

    /// World position, when the API knows it.
    pub fn world_rank(&self) -> Option<u64> {
        match &self.position_world {
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u64)
            }),
            _ => None,
        }
    }
}

impl MapLeaderboard {
    pub fn entries(&self) -> &[LeaderboardEntry] {
        self.top10.as_deref().unwrap_or_default()
    }

    pub fn title(&self, tmx_id: &str) -> String {
        match non_empty(&self.map_name) {
            Some(name) => name.to_string(),
            None => format!("TMX {tmx_id}"),
        }
    }

    pub fn author(&self) -> &str {
        non_empty(&self.author_name).unwrap_or(UNKNOWN_AUTHOR)
    }

    /// Author medal time in ms, if the API sent a usable number.
    pub fn author_time_ms(&self) -> Option<f64> {
        self.author_time.as_f64().filter(|ms| ms.is_finite())
    }

    pub fn thumbnail(&self) -> Option<&str> {
        non_empty(&self.thumbnail)
    }

    /// Identifier shown in the footer: the map UID, or the TMX id echoed by the API.
    pub fn map_identifier(&self) -> Option<String> {
        if let Some(uid) = non_empty(&self.map_uid) {
            return Some(uid.to_string());
        }
        match &self.tmx_id {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

impl CampaignLeaderboard {
    pub fn entries(&self) -> &[LeaderboardEntry] {
        self.top10.as_deref().unwrap_or_default()
    }

    pub fn campaign_name(&self) -> &str {
        self.campaign
            .as_ref()
            .and_then(|c| non_empty(&c.name))
            .unwrap_or(DEFAULT_CAMPAIGN_NAME)
    }

    pub fn season(&self) -> &str {
        self.campaign
            .as_ref()
            .and_then(|c| non_empty(&c.season_uid))
            .unwrap_or(UNKNOWN_SEASON)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
