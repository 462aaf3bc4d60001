use anyhow::Result;
use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::command::{self, Command};
use crate::config::{CommandConfig, Config};
use crate::cooldown::{CooldownDecision, CooldownTracker};
use crate::format::{is_plausible_numeric_id, truncate};
use crate::platform::{IncomingMessage, Responder};
use crate::reply::{self, Reply, FETCHING};

const MAX_ERROR_REPLY_CHARS: usize = 1500;

/// What happened to one incoming message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not addressed to the bot.
    Ignored,
    /// The user hit the cooldown and got a wait notice.
    Throttled,
    Replied,
    /// The command failed; an error reply was attempted.
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    Validation(String),
    #[error("chat platform error: {0:#}")]
    Chat(#[from] anyhow::Error),
}

impl CommandError {
    /// The reply shown to the user for this error.
    pub fn user_message(&self, prefix: &str) -> String {
        let message = match self {
            CommandError::Validation(reason) => format!(
                "❌ {reason}\n{}\n\n{}",
                reply::map_usage(prefix),
                reply::help_text(prefix)
            ),
            other => format!("❌ Error: {other}"),
        };
        truncate(&message, MAX_ERROR_REPLY_CHARS)
    }
}

/// Routes prefixed commands to the leaderboard API and answers through a [`Responder`].
pub struct Bot {
    api: ApiClient,
    cooldown: CooldownTracker,
    prefix: String,
}

impl Bot {
    pub fn new(api: ApiClient, commands: CommandConfig) -> Self {
        Self {
            api,
            cooldown: CooldownTracker::new(commands.cooldown_ms),
            prefix: commands.prefix,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api = ApiClient::new(config.api.clone())?;
        Ok(Self::new(api, config.commands.clone()))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub async fn handle<R: Responder>(&self, incoming: &IncomingMessage, responder: &R) -> Outcome {
        self.handle_at(incoming, responder, Utc::now().timestamp_millis())
            .await
    }

    /// Handle one message as if it arrived at `now_ms`. Never fails: every error ends up
    /// as a reply to the user.
    pub async fn handle_at<R: Responder>(
        &self,
        incoming: &IncomingMessage,
        responder: &R,
        now_ms: i64,
    ) -> Outcome {
        if incoming.is_bot {
            return Outcome::Ignored;
        }

        let Some(parsed) = command::parse(&incoming.text, &self.prefix) else {
            return Outcome::Ignored;
        };
        let command = Command::from(&parsed);

        info!(
            "{} command from {} ({}) in {}: {:?}",
            incoming.platform, incoming.user_name, incoming.user_id, incoming.chat_id, command
        );

        match self
            .cooldown
            .check_and_record(&incoming.user_id, now_ms)
            .await
        {
            CooldownDecision::OnCooldown { remaining_ms } => {
                debug!(
                    "User {} on cooldown for another {}ms",
                    incoming.user_id, remaining_ms
                );
                if let Err(e) = responder.reply(reply::cooldown_notice(remaining_ms)).await {
                    warn!("Failed to send cooldown notice: {:#}", e);
                    return Outcome::Failed;
                }
                return Outcome::Throttled;
            }
            CooldownDecision::Allowed => {
                debug!("{} users tracked by cooldown", self.cooldown.tracked_users().await);
            }
        }

        let mut placeholder = None;
        match self.execute(command, responder, &mut placeholder).await {
            Ok(()) => Outcome::Replied,
            Err(err) => {
                error!(
                    "Command '{}' from {} failed: {}",
                    parsed.name, incoming.user_id, err
                );

                let reply = Reply::text(err.user_message(&self.prefix));
                let delivered = match placeholder.as_mut() {
                    Some(sent) => responder.edit(sent, reply).await,
                    None => responder.reply(reply).await.map(|_| ()),
                };
                if let Err(e) = delivered {
                    error!("Failed to deliver error reply: {:#}", e);
                }

                Outcome::Failed
            }
        }
    }

    async fn execute<R: Responder>(
        &self,
        command: Command,
        responder: &R,
        placeholder: &mut Option<R::Sent>,
    ) -> Result<(), CommandError> {
        match command {
            Command::Help => {
                responder.reply(reply::help(&self.prefix)).await?;
            }
            Command::Unknown(_) => {
                responder.reply(reply::unknown_command(&self.prefix)).await?;
            }
            Command::Map(tmx_id) => {
                let tmx_id = match tmx_id {
                    Some(id) if is_plausible_numeric_id(&id) => id.trim().to_string(),
                    Some(id) => {
                        return Err(CommandError::Validation(format!(
                            "`{}` is not a valid TMX id.",
                            truncate(&id, 32)
                        )))
                    }
                    None => return Err(CommandError::Validation("Missing TMX id.".to_string())),
                };

                let sent = placeholder.insert(responder.reply(Reply::text(FETCHING)).await?);
                let map = self.api.map_top10(&tmx_id).await?;
                info!(
                    "Map {} returned {} entries",
                    tmx_id,
                    map.entries().len()
                );
                responder
                    .edit(sent, reply::map_leaderboard(&tmx_id, &map))
                    .await?;
            }
            Command::Campaign => {
                let sent = placeholder.insert(responder.reply(Reply::text(FETCHING)).await?);

                if self.api.refresh_before_campaign() {
                    if let Err(e) = self.api.refresh().await {
                        warn!("Leaderboard refresh failed, serving cached data: {}", e);
                    }
                }

                let campaign = self.api.campaign_top10().await?;
                info!(
                    "Campaign '{}' returned {} entries",
                    campaign.campaign_name(),
                    campaign.entries().len()
                );
                responder
                    .edit(sent, reply::campaign_leaderboard(&campaign))
                    .await?;
            }
        }

        Ok(())
    }
}
