// Discord surface used by the roster renderer and commands
// Everything the bot touches on the platform goes through these traits

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::debug;

use crate::Error;

/// Minimal view of a fetched message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchedMessage {
    pub id: serenity::MessageId,
    pub created_at: DateTime<Utc>,
}

/// Something the renderer posts to the roster channel
#[derive(Debug, Clone)]
pub enum RosterPost {
    Text(String),
    Embed(serenity::CreateEmbed),
}

impl RosterPost {
    fn into_message(self) -> serenity::CreateMessage {
        match self {
            RosterPost::Text(content) => serenity::CreateMessage::new().content(content),
            RosterPost::Embed(embed) => serenity::CreateMessage::new().embed(embed),
        }
    }
}

/// Channel operations the renderer needs
#[async_trait]
pub trait RosterChannel: Send + Sync {
    fn name(&self) -> &str;

    /// Most recent messages first, at most `limit`
    async fn fetch_messages(&self, limit: u8) -> anyhow::Result<Vec<FetchedMessage>>;

    /// Delete up to 100 messages younger than 14 days in one call
    async fn bulk_delete(&self, ids: &[serenity::MessageId]) -> anyhow::Result<()>;

    async fn delete_message(&self, id: serenity::MessageId) -> anyhow::Result<()>;

    async fn send(&self, post: RosterPost) -> anyhow::Result<()>;
}

/// Turns a configured channel id into something we can render into
#[async_trait]
pub trait ChannelResolver: Send + Sync {
    async fn resolve(&self, channel_id: serenity::ChannelId) -> Option<Arc<dyn RosterChannel>>;
}

/// Replies to the user who invoked a command
#[async_trait]
pub trait Responder: Send + Sync {
    async fn reply(&self, content: String, ephemeral: bool) -> Result<(), Error>;

    async fn follow_up(&self, content: String, ephemeral: bool) -> Result<(), Error>;
}

/// Guild text channel backed by serenity's HTTP client
pub struct SerenityChannel {
    http: Arc<serenity::Http>,
    id: serenity::ChannelId,
    name: String,
}

#[async_trait]
impl RosterChannel for SerenityChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_messages(&self, limit: u8) -> anyhow::Result<Vec<FetchedMessage>> {
        let messages = self
            .id
            .messages(&self.http, serenity::GetMessages::new().limit(limit))
            .await?;

        Ok(messages
            .iter()
            .map(|m| FetchedMessage {
                id: m.id,
                created_at: DateTime::from_timestamp(m.timestamp.unix_timestamp(), 0)
                    .unwrap_or_else(Utc::now),
            })
            .collect())
    }

    async fn bulk_delete(&self, ids: &[serenity::MessageId]) -> anyhow::Result<()> {
        self.id.delete_messages(&self.http, ids).await?;
        Ok(())
    }

    async fn delete_message(&self, id: serenity::MessageId) -> anyhow::Result<()> {
        self.id.delete_message(&self.http, id).await?;
        Ok(())
    }

    async fn send(&self, post: RosterPost) -> anyhow::Result<()> {
        self.id.send_message(&self.http, post.into_message()).await?;
        Ok(())
    }
}

/// Looks channels up in the gateway cache, then over HTTP
pub struct SerenityResolver {
    http: Arc<serenity::Http>,
    cache: Arc<serenity::Cache>,
}

impl SerenityResolver {
    pub fn new(ctx: &serenity::Context) -> Self {
        Self {
            http: ctx.http.clone(),
            cache: ctx.cache.clone(),
        }
    }
}

#[async_trait]
impl ChannelResolver for SerenityResolver {
    async fn resolve(&self, channel_id: serenity::ChannelId) -> Option<Arc<dyn RosterChannel>> {
        // Cache first, HTTP on a miss
        let name = match channel_id.to_channel((&self.cache, &*self.http)).await {
            Ok(channel) => channel.guild()?.name,
            Err(e) => {
                debug!("Channel {} not reachable: {:?}", channel_id, e);
                return None;
            }
        };

        Some(Arc::new(SerenityChannel {
            http: self.http.clone(),
            id: channel_id,
            name,
        }))
    }
}

/// Replies through a poise context; the first send answers the interaction,
/// later sends become follow-ups
pub struct PoiseResponder<'a> {
    ctx: crate::Context<'a>,
}

impl<'a> PoiseResponder<'a> {
    pub fn new(ctx: crate::Context<'a>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Responder for PoiseResponder<'_> {
    async fn reply(&self, content: String, ephemeral: bool) -> Result<(), Error> {
        self.ctx
            .send(poise::CreateReply::default().content(content).ephemeral(ephemeral))
            .await?;
        Ok(())
    }

    async fn follow_up(&self, content: String, ephemeral: bool) -> Result<(), Error> {
        self.reply(content, ephemeral).await
    }
}
