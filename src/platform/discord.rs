use std::sync::Arc;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use serenity::all::{
    Client, Context, CreateEmbed, CreateEmbedFooter, CreateMessage, EditMessage, EventHandler,
    GatewayIntents, Message, Ready,
};
use tracing::{debug, info};

use crate::bot::Bot;
use crate::platform::{IncomingMessage, Responder};
use crate::reply::{Embed, Reply};

/// Run the Discord platform until the gateway connection ends.
pub async fn run(bot: Arc<Bot>, token: &str) -> Result<()> {
    info!("Starting Discord platform...");

    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(token, intents)
        .event_handler(Handler { bot })
        .await
        .context("Failed to create Discord client")?;

    client
        .start()
        .await
        .context("Discord client stopped with an error")?;

    Ok(())
}

struct Handler {
    bot: Arc<Bot>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            "Connected to Discord as {}, listening for '{}' commands",
            ready.user.name,
            self.bot.prefix()
        );
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let incoming = IncomingMessage {
            platform: "discord".to_string(),
            user_id: msg.author.id.to_string(),
            chat_id: msg.channel_id.to_string(),
            user_name: msg.author.name.clone(),
            text: msg.content.clone(),
            is_bot: msg.author.bot || msg.webhook_id.is_some(),
        };

        let responder = DiscordResponder { ctx: &ctx, msg: &msg };
        let outcome = self.bot.handle(&incoming, &responder).await;
        debug!("Message {} handled: {:?}", msg.id, outcome);
    }
}

/// Replies to one Discord message, referencing it.
struct DiscordResponder<'a> {
    ctx: &'a Context,
    msg: &'a Message,
}

#[async_trait]
impl Responder for DiscordResponder<'_> {
    type Sent = Message;

    async fn reply(&self, reply: Reply) -> Result<Message> {
        let builder = match reply {
            Reply::Text(content) => CreateMessage::new().content(content),
            Reply::Embed(embed) => CreateMessage::new().embed(build_embed(&embed)),
        }
        .reference_message(self.msg);

        self.msg
            .channel_id
            .send_message(self.ctx, builder)
            .await
            .context("Failed to send Discord reply")
    }

    async fn edit(&self, sent: &mut Message, reply: Reply) -> Result<()> {
        let builder = match reply {
            Reply::Text(content) => EditMessage::new().content(content).embeds(Vec::new()),
            Reply::Embed(embed) => EditMessage::new().content("").embed(build_embed(&embed)),
        };

        sent.edit(self.ctx, builder)
            .await
            .context("Failed to edit Discord reply")
    }
}

fn build_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new()
        .title(&embed.title)
        .description(&embed.description)
        .colour(embed.colour);
    if let Some(ref url) = embed.url {
        builder = builder.url(url);
    }
    for field in &embed.fields {
        builder = builder.field(&field.name, &field.value, field.inline);
    }
    if let Some(ref thumbnail) = embed.thumbnail {
        builder = builder.thumbnail(thumbnail);
    }
    if let Some(ref footer) = embed.footer {
        builder = builder.footer(CreateEmbedFooter::new(footer));
    }
    builder
}
