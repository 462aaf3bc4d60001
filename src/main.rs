mod api;
mod bot;
mod command;
mod config;
mod cooldown;
mod format;
mod leaderboard;
mod platform;
mod reply;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::bot::Bot;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,godbot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration from environment")?;

    info!("Configuration loaded successfully");
    info!("  API: {}", config.api.base_url);
    info!("  API timeout: {:?}", config.api.timeout);
    info!("  Refresh before campaign: {}", config.api.refresh_before_campaign);
    info!("  Prefix: {}", config.commands.prefix);
    info!("  Cooldown: {}ms", config.commands.cooldown_ms);

    let bot = Arc::new(Bot::from_config(&config).context("Failed to create leaderboard client")?);

    // Run the Discord bot
    info!("Bot is starting...");
    platform::discord::run(bot, &config.discord.token).await?;

    Ok(())
}
