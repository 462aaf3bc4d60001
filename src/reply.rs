//! Platform-neutral reply content for each command.

use serde_json::Value;

use crate::format::{format_duration, format_points};
use crate::leaderboard::{CampaignLeaderboard, MapLeaderboard};

pub const FETCHING: &str = "⏳ Fetching…";
pub const MAX_RANKED_ENTRIES: usize = 10;
const MISSING_TIME: &str = "—";
const EMBED_COLOUR: u32 = 0xFF9933;

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Embed(Embed),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Embed {
    pub title: String,
    pub url: Option<String>,
    pub description: String,
    pub colour: u32,
    pub fields: Vec<EmbedField>,
    pub thumbnail: Option<String>,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Reply::Text(content.into())
    }

    /// Everything a user would read, flattened to one string. Used for logs and tests.
    pub fn to_plain_text(&self) -> String {
        match self {
            Reply::Text(content) => content.clone(),
            Reply::Embed(embed) => {
                let mut out = embed.title.clone();
                out.push('\n');
                out.push_str(&embed.description);
                for field in &embed.fields {
                    out.push_str(&format!("\n{}: {}", field.name, field.value));
                }
                if let Some(footer) = &embed.footer {
                    out.push('\n');
                    out.push_str(footer);
                }
                out
            }
        }
    }
}

pub fn help_text(prefix: &str) -> String {
    format!(
        "**Trackmania India leaderboards**\n\
         `{prefix}help` / `{prefix}h` - show this message\n\
         `{prefix}map <tmxId>` / `{prefix}m <tmxId>` - top 10 Indian records on a TMX map, e.g. `{prefix}map 273080`\n\
         `{prefix}all` / `{prefix}a` / `{prefix}campaign` - top 10 Indian players in the current campaign"
    )
}

pub fn help(prefix: &str) -> Reply {
    Reply::Text(help_text(prefix))
}

pub fn unknown_command(prefix: &str) -> Reply {
    Reply::Text(format!("Unknown command.\n\n{}", help_text(prefix)))
}

pub fn map_usage(prefix: &str) -> String {
    format!("Usage: `{prefix}map <tmxId>` (3 to 12 digits)")
}

pub fn cooldown_notice(remaining_ms: i64) -> Reply {
    let seconds = remaining_ms.max(0) as f64 / 1000.0;
    Reply::Text(format!("⏳ Slow down! Try again in {seconds:.1}s."))
}

pub fn tmx_url(tmx_id: &str) -> String {
    format!("https://trackmania.exchange/mapshow/{tmx_id}")
}

pub fn map_leaderboard(tmx_id: &str, map: &MapLeaderboard) -> Reply {
    let entries = map.entries();
    if entries.is_empty() {
        return Reply::Text(format!("No Indian records found for TMX `{tmx_id}`."));
    }

    let lines: Vec<String> = entries
        .iter()
        .take(MAX_RANKED_ENTRIES)
        .enumerate()
        .map(|(i, entry)| {
            let world = match entry.world_rank() {
                Some(rank) => format!("World #{rank}"),
                None => "World #?".to_string(),
            };
            format!(
                "`{}.` **{}** - `{}` ({})",
                i + 1,
                entry.name(),
                format_duration(&entry.time_or_score),
                world
            )
        })
        .collect();

    let author_time = match map.author_time_ms() {
        Some(ms) => format_duration(&Value::from(ms)),
        None => MISSING_TIME.to_string(),
    };

    Reply::Embed(Embed {
        title: format!("🇮🇳 {}", map.title(tmx_id)),
        url: Some(tmx_url(tmx_id)),
        description: lines.join("\n"),
        colour: EMBED_COLOUR,
        fields: vec![
            EmbedField {
                name: "Author".to_string(),
                value: map.author().to_string(),
                inline: true,
            },
            EmbedField {
                name: "Author time".to_string(),
                value: author_time,
                inline: true,
            },
        ],
        thumbnail: map.thumbnail().map(str::to_string),
        footer: map.map_identifier().map(|id| format!("Map: {id}")),
    })
}

pub fn campaign_leaderboard(campaign: &CampaignLeaderboard) -> Reply {
    let entries = campaign.entries();
    if entries.is_empty() {
        return Reply::Text("No campaign top 10 found.".to_string());
    }

    let lines: Vec<String> = entries
        .iter()
        .take(MAX_RANKED_ENTRIES)
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "`{}.` **{}** - {} pts",
                i + 1,
                entry.name(),
                format_points(&entry.points)
            )
        })
        .collect();

    Reply::Embed(Embed {
        title: format!("🇮🇳 Top 10 India - {}", campaign.campaign_name()),
        url: None,
        description: lines.join("\n"),
        colour: EMBED_COLOUR,
        fields: Vec::new(),
        thumbnail: None,
        footer: Some(format!("Season: {}", campaign.season())),
    })
}
