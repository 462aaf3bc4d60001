use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub discord: DiscordConfig,
    pub api: ApiConfig,
    pub commands: CommandConfig,
}

#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the leaderboard API, without trailing slash.
    pub base_url: String,
    pub timeout: Duration,
    /// Hit `{base}/refresh` before fetching the campaign top 10.
    pub refresh_before_campaign: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandConfig {
    pub prefix: String,
    pub cooldown_ms: i64,
}

fn default_prefix() -> String {
    "god!".to_string()
}

fn default_cooldown_ms() -> i64 {
    3500
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            cooldown_ms: default_cooldown_ms(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(default_timeout_secs()),
            refresh_before_campaign: false,
        }
    }
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first, without overriding variables
    /// that were set explicitly.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .context("missing Discord bot token in DISCORD_TOKEN")?;

        let base_url = lookup("API_BASE_URL")
            .filter(|u| !u.trim().is_empty())
            .context("missing leaderboard API base url in API_BASE_URL")?;

        let mut api = ApiConfig::new(base_url.trim());

        if let Some(secs) = lookup("API_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("API_TIMEOUT_SECS is not a number: {secs}"))?;
            anyhow::ensure!(secs > 0, "API_TIMEOUT_SECS must be positive");
            api.timeout = Duration::from_secs(secs);
        }

        if let Some(flag) = lookup("API_REFRESH_BEFORE_CAMPAIGN") {
            api.refresh_before_campaign = parse_flag(&flag)
                .with_context(|| format!("API_REFRESH_BEFORE_CAMPAIGN is not a boolean: {flag}"))?;
        }

        let mut commands = CommandConfig::default();

        if let Some(prefix) = lookup("COMMAND_PREFIX") {
            let prefix = prefix.trim();
            anyhow::ensure!(!prefix.is_empty(), "COMMAND_PREFIX must not be empty");
            commands.prefix = prefix.to_string();
        }

        if let Some(ms) = lookup("COOLDOWN_MS") {
            let ms: i64 = ms
                .trim()
                .parse()
                .with_context(|| format!("COOLDOWN_MS is not a number: {ms}"))?;
            anyhow::ensure!(ms >= 0, "COOLDOWN_MS must not be negative");
            commands.cooldown_ms = ms;
        }

        Ok(Self {
            discord: DiscordConfig { token },
            api,
            commands,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
