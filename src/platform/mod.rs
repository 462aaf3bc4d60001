pub mod discord;

use anyhow::Result;
use async_trait::async_trait;

use crate::reply::Reply;

/// A message received from any platform
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Platform identifier (e.g., "discord")
    pub platform: String,
    /// Platform-specific user ID as string
    pub user_id: String,
    /// Platform-specific chat/channel ID as string
    pub chat_id: String,
    /// Display name of the user
    pub user_name: String,
    /// The message text
    pub text: String,
    /// Set by the platform for bot and webhook authors
    pub is_bot: bool,
}

/// Reply channel back to the author of one incoming message.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Handle to a sent reply, used to edit it afterwards.
    type Sent: Send;

    async fn reply(&self, reply: Reply) -> Result<Self::Sent>;

    async fn edit(&self, sent: &mut Self::Sent, reply: Reply) -> Result<()>;
}
