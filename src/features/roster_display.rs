// Roster channel rendering
// Purges the roster channel, then posts the roster grouped by class

use chrono::{DateTime, Local, Utc};
use poise::serenity_prelude as serenity;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::api::discord::{FetchedMessage, RosterChannel, RosterPost};
use crate::models::member::Roster;
use crate::state::AppState;
use crate::utils::config::{colors, BULK_DELETE_MAX_AGE_DAYS, FETCH_LIMIT, PURGE_PAUSE};
use crate::utils::emojis::{class_color, class_icon, weapon_icon};
use crate::utils::formatters::format_updated_at;

pub const EMPTY_ROSTER_TEXT: &str = "El roster está vacío. Añade miembros usando `/añadirmiembro`.";
pub const HEADER_TITLE: &str = "📋 ROSTER DEL GREMIO 📋";
pub const FOOTER_DESCRIPTION: &str = "Usa `/añadirmiembro` para unirte al roster";
pub const FOOTER_TEXT: &str = "Gestión de Roster | Bot creado por [Draco]";

/// Best-effort wipe of the channel history.
///
/// Recent messages go in one bulk delete per batch, older ones one by one with
/// a pause in between. Stops once a short batch had no old messages, so an
/// old-only remainder can survive.
pub async fn purge_channel(channel: &dyn RosterChannel) -> bool {
    info!("Purging roster channel #{}...", channel.name());
    match purge_batches(channel).await {
        Ok(deleted) => {
            info!("Roster channel purged: {} messages deleted", deleted);
            true
        }
        Err(e) => {
            error!("Failed to purge roster channel: {:?}", e);
            false
        }
    }
}

async fn purge_batches(channel: &dyn RosterChannel) -> anyhow::Result<usize> {
    let mut deleted = 0;

    loop {
        let fetched = channel.fetch_messages(FETCH_LIMIT).await?;
        if fetched.is_empty() {
            break;
        }

        let cutoff = Utc::now() - chrono::Duration::days(BULK_DELETE_MAX_AGE_DAYS);
        let (recent, old): (Vec<FetchedMessage>, Vec<FetchedMessage>) =
            fetched.iter().partition(|m| m.created_at > cutoff);

        if !recent.is_empty() {
            let ids: Vec<serenity::MessageId> = recent.iter().map(|m| m.id).collect();
            channel.bulk_delete(&ids).await?;
            deleted += ids.len();
            debug!("Bulk deleted {} recent messages", ids.len());
        }

        for message in &old {
            match channel.delete_message(message.id).await {
                Ok(()) => {
                    deleted += 1;
                    tokio::time::sleep(PURGE_PAUSE).await;
                }
                Err(e) => error!("Failed to delete old message {}: {:?}", message.id, e),
            }
        }

        let drained = fetched.len() < FETCH_LIMIT as usize && old.is_empty();

        tokio::time::sleep(PURGE_PAUSE).await;

        if drained {
            break;
        }
    }

    Ok(deleted)
}

/// Everything the roster channel should contain, in posting order
pub fn build_roster_posts(roster: &Roster, now: &DateTime<Local>) -> Vec<RosterPost> {
    if roster.is_empty() {
        return vec![RosterPost::Text(EMPTY_ROSTER_TEXT.to_string())];
    }

    let mut posts = vec![RosterPost::Embed(
        serenity::CreateEmbed::new()
            .title(HEADER_TITLE)
            .description(format!("Actualizado: {}", format_updated_at(now)))
            .color(colors::ROSTER_FRAME),
    )];

    for (bucket, members) in roster.grouped_by_class() {
        let icon = class_icon(&bucket);
        let label = bucket.label();
        let mut embed = serenity::CreateEmbed::new()
            .title(format!("{} ROSTER - {} {}", icon, label, icon))
            .color(class_color(&bucket))
            .description(format!("**Total de {} {}(s)**", members.len(), label))
            .timestamp(serenity::Timestamp::now());

        for member in members {
            embed = embed.field(
                format!("**{}**", member.nickname),
                format!(
                    "**Armas:**\n- {} {}\n- {} {}",
                    weapon_icon(&member.weapon1),
                    member.weapon1,
                    weapon_icon(&member.weapon2),
                    member.weapon2
                ),
                true,
            );
        }

        posts.push(RosterPost::Embed(embed));
    }

    posts.push(RosterPost::Embed(
        serenity::CreateEmbed::new()
            .description(FOOTER_DESCRIPTION)
            .color(colors::ROSTER_FRAME)
            .footer(serenity::CreateEmbedFooter::new(FOOTER_TEXT)),
    ));

    posts
}

/// Post the roster into the channel
pub async fn display_roster(channel: &dyn RosterChannel, roster: &Roster) -> anyhow::Result<()> {
    for post in build_roster_posts(roster, &Local::now()) {
        channel.send(post).await?;
    }
    Ok(())
}

#[derive(Debug, Default)]
struct LastRender {
    /// Highest ticket whose state this render saw
    covers: u64,
    ok: bool,
}

/// Serializes renders and folds requests that queued up behind a running one.
///
/// Each request takes a ticket. Once it gets the lock, if the last render
/// started after that ticket was issued, the request is already satisfied and
/// returns that render's result instead of rendering again.
#[derive(Debug, Default)]
pub struct RenderQueue {
    issued: AtomicU64,
    last: Mutex<LastRender>,
}

impl RenderQueue {
    pub async fn run<F, Fut>(&self, render: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let mut last = self.last.lock().await;

        if last.covers >= ticket {
            debug!("Render request {} coalesced into {}", ticket, last.covers);
            return last.ok;
        }

        let covers = self.issued.load(Ordering::SeqCst);
        let ok = render().await;
        *last = LastRender { covers, ok };
        ok
    }
}

/// Purge and repost the configured roster channel
pub async fn update_roster_display(state: &AppState) -> bool {
    state.render_queue.run(|| render_roster_channel(state)).await
}

async fn render_roster_channel(state: &AppState) -> bool {
    let channel_id = state.config.read().await.roster_channel();
    let Some(channel_id) = channel_id else {
        info!("No roster channel configured");
        return false;
    };

    let Some(channel) = state.channels.resolve(channel_id).await else {
        info!("Roster channel {} not found", channel_id);
        return false;
    };

    // A partial purge still gets a fresh roster posted
    if !purge_channel(channel.as_ref()).await {
        debug!("Purge incomplete, posting roster anyway");
    }

    let roster = state.roster.read().await.clone();
    match display_roster(channel.as_ref(), &roster).await {
        Ok(()) => true,
        Err(e) => {
            error!("Failed to update roster display: {:?}", e);
            false
        }
    }
}

/// Kick off a render without waiting for it
pub fn request_render(state: Arc<AppState>) {
    tokio::spawn(async move {
        update_roster_display(&state).await;
    });
}
